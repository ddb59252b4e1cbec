//! In-memory object store with the listing semantics of a prefix-keyed bucket.
//!
//! Used as the reference implementation of [`ObjectStore`] in tests and demos. Besides the
//! primitives it keeps a journal of every call and can be told to fail specific calls.

use crate::error::StoreError;
use crate::store::ObjectStore;
use crate::types::{ListEntry, ListOptions, ObjectMetadata, UploadOptions};
use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Arc;
use tracing::trace;

const OBJECT_ID_LEN: usize = 21;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryStoreConfig {
    pub bucket: String,
    pub public_base_url: String,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            bucket: "user-files".to_owned(),
            public_base_url: "http://localhost:54321/storage/v1/object/public".to_owned(),
        }
    }
}

/// The primitive a journal entry or an injected fault refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Upload,
    List,
    Move,
    Remove,
    Download,
    PublicUrl,
}

/// A recorded primitive call. For moves `key` is the source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub op: StoreOp,
    pub key: String,
}

#[derive(Debug)]
struct StoredObject {
    id: String,
    content: Vec<u8>,
    content_type: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    objects: BTreeMap<String, StoredObject>,
    faults: FxHashSet<(StoreOp, String)>,
    journal: Vec<StoreCall>,
}

#[derive(Debug)]
pub struct MemoryStoreInner {
    config: MemoryStoreConfig,
    state: RwLock<MemoryState>,
}

/// A cloneable handle to an in-memory bucket.
///
/// Clones share the same objects, faults and journal, so a test can keep one handle while
/// the code under test owns another.
///
/// ```rust
/// use strata_object_store::{ListOptions, MemoryStore, ObjectStore, UploadOptions};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), strata_object_store::StoreError> {
/// let store = MemoryStore::new();
/// store.upload("alice/docs/a.txt", b"hi".to_vec(), UploadOptions::new()).await?;
///
/// let root = store.list("alice", ListOptions::new()).await?;
/// assert_eq!(root.len(), 1);
/// assert!(root[0].is_folder());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl Deref for MemoryStore {
    type Target = MemoryStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    #[must_use]
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            inner: Arc::new(MemoryStoreInner { config, state: RwLock::new(MemoryState::default()) }),
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Makes every later `op` call on `key` fail with [`StoreError::Rejected`].
    pub fn fail_on(&self, op: StoreOp, key: impl Into<String>) {
        self.state.write().faults.insert((op, key.into()));
    }

    pub fn clear_faults(&self) {
        self.state.write().faults.clear();
    }

    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.read().journal.clone()
    }

    #[must_use]
    pub fn count(&self, op: StoreOp) -> usize {
        self.state.read().journal.iter().filter(|c| c.op == op).count()
    }

    pub fn clear_calls(&self) {
        self.state.write().journal.clear();
    }

    /// All stored keys in lexical order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.state.read().objects.keys().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.state.read().objects.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records the call and applies any injected fault.
    fn enter(&self, op: StoreOp, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.journal.push(StoreCall { op, key: key.to_owned() });
        trace!(?op, key, "Object store call");

        if state.faults.contains(&(op, key.to_owned())) {
            return Err(StoreError::Rejected {
                message: format!("injected failure for {op:?} {key}").into(),
                context: None,
            });
        }
        Ok(())
    }
}

impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        key: &str,
        content: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, StoreError> {
        self.enter(StoreOp::Upload, key)?;
        validate_key(key)?;

        let mut state = self.state.write();
        let id = match state.objects.get(key) {
            Some(_) if !options.upsert => {
                return Err(StoreError::AlreadyExists { message: key.to_owned().into(), context: None });
            },
            Some(existing) => existing.id.clone(),
            None => nanoid::nanoid!(OBJECT_ID_LEN),
        };

        state.objects.insert(
            key.to_owned(),
            StoredObject {
                id,
                content,
                content_type: options.content_type.map(String::from),
                created_at: Utc::now(),
            },
        );
        Ok(key.to_owned())
    }

    async fn list(&self, prefix: &str, options: ListOptions) -> Result<Vec<ListEntry>, StoreError> {
        self.enter(StoreOp::List, prefix)?;

        let prefix = prefix.trim_matches('/');
        let scan = if prefix.is_empty() { String::new() } else { format!("{prefix}/") };

        let state = self.state.read();
        let mut files = Vec::new();
        let mut folders = BTreeSet::new();

        for (key, object) in state.objects.range(scan.clone()..) {
            let Some(rest) = key.strip_prefix(&scan) else { break };
            match rest.split_once('/') {
                Some((folder, _)) => {
                    folders.insert(folder.to_owned());
                },
                None => files.push(ListEntry {
                    name: rest.to_owned(),
                    id: Some(object.id.clone()),
                    metadata: Some(ObjectMetadata {
                        size: Some(u64::try_from(object.content.len()).unwrap_or(u64::MAX)),
                        mimetype: object.content_type.clone(),
                    }),
                    created_at: Some(object.created_at),
                }),
            }
        }

        let mut entries: Vec<ListEntry> = folders.into_iter().map(ListEntry::folder).collect();
        entries.extend(files);
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let entries = entries.into_iter().skip(options.offset);
        Ok(match options.limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        })
    }

    async fn move_object(&self, from: &str, to: &str) -> Result<(), StoreError> {
        self.enter(StoreOp::Move, from)?;
        validate_key(from)?;
        validate_key(to)?;

        let mut state = self.state.write();
        if state.objects.contains_key(to) {
            return Err(StoreError::AlreadyExists { message: to.to_owned().into(), context: None });
        }
        let object = state
            .objects
            .remove(from)
            .ok_or_else(|| StoreError::NotFound { message: from.to_owned().into(), context: None })?;
        state.objects.insert(to.to_owned(), object);
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StoreError> {
        self.enter(StoreOp::Remove, &keys.join(","))?;
        for key in keys {
            validate_key(key)?;
        }

        let mut state = self.state.write();
        let missing: Vec<&str> =
            keys.iter().filter(|k| !state.objects.contains_key(*k)).map(String::as_str).collect();
        if !missing.is_empty() {
            return Err(StoreError::NotFound { message: missing.join(", ").into(), context: None });
        }
        for key in keys {
            state.objects.remove(key);
        }
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.enter(StoreOp::Download, key)?;
        validate_key(key)?;

        self.state
            .read()
            .objects
            .get(key)
            .map(|o| o.content.clone())
            .ok_or_else(|| StoreError::NotFound { message: key.to_owned().into(), context: None })
    }

    async fn public_url(&self, key: &str) -> Result<String, StoreError> {
        self.enter(StoreOp::PublicUrl, key)?;
        validate_key(key)?;

        let base = self.config.public_base_url.trim_end_matches('/');
        Ok(format!("{base}/{}/{key}", self.config.bucket))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.starts_with('/') || key.ends_with('/') || key.contains("//") {
        return Err(StoreError::Rejected {
            message: format!("invalid object key '{key}'").into(),
            context: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation() {
        assert!(validate_key("a/b.txt").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/a").is_err());
        assert!(validate_key("a/").is_err());
        assert!(validate_key("a//b").is_err());
    }

    #[test]
    fn config_defaults() {
        let config = MemoryStoreConfig::default();
        assert_eq!(config.bucket, "user-files");
        assert!(config.public_base_url.starts_with("http"));
    }
}
