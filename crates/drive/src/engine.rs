//! The [`Drive`] handle and its single-object file operations.
//!
//! Directory-level behavior lives next to it: the marker protocol in `marker`, tree
//! materialization in `tree` and the recursive rename/delete in `recursive`. All of them are
//! inherent methods of the same handle.

use crate::builder::{DriveBuilder, NoStore};
use crate::config::DriveConfig;
use crate::error::{DriveError, StoreResultExt};
use crate::key::{ObjectKey, TenantId, build_key, file_key};
use crate::tenant::TenantDrive;
use std::ops::Deref;
use std::sync::Arc;
use strata_object_store::{ListEntry, ListOptions, ObjectStore, StoreError, UploadOptions};
use tracing::{debug, info};

/// The shared state behind a [`Drive`].
#[derive(Debug)]
pub struct DriveInner<S> {
    pub(crate) store: S,
    pub(crate) config: DriveConfig,
}

/// A thread-safe handle presenting directories over a flat [`ObjectStore`].
///
/// Every operation is a forward-only sequence of store calls awaited in order. Nothing is
/// rolled back: when a multi-object operation fails, the error names the key it stopped at
/// and everything processed before it stays applied.
///
/// The handle is reference-counted and cheap to clone; the store client inside is the only
/// state, and it is never mutated after [`DriveBuilder::build`].
///
/// # Example
///
/// ```rust
/// use strata_drive::{Drive, DriveError, TenantId};
/// use strata_object_store::MemoryStore;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), DriveError> {
///     let drive = Drive::builder().store(MemoryStore::new()).build()?;
///     let alice = TenantId::try_from("alice")?;
///
///     drive.create_directory(&alice, "Photos/été").await?;
///     drive.upload_file(&alice, "Photos/été", "plage.jpg", b"jpeg".to_vec()).await?;
///
///     let tree = drive.tree(&alice).await?;
///     assert_eq!(tree.count_files(), 1);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Drive<S> {
    pub(crate) inner: Arc<DriveInner<S>>,
}

impl<S> Clone for Drive<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S> Deref for Drive<S> {
    type Target = DriveInner<S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Drive<NoStore> {
    #[must_use = "The drive is not usable until you call .store(..).build()"]
    pub fn builder() -> DriveBuilder {
        DriveBuilder::new()
    }
}

impl<S: ObjectStore> Drive<S> {
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Returns a view of the drive bound to one tenant.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::InvalidTenant`] if the id is empty after sanitization or is not a
    /// single path component.
    pub fn tenant<T>(&self, id: T) -> Result<TenantDrive<S>, DriveError>
    where
        T: TryInto<TenantId, Error = DriveError>,
    {
        Ok(TenantDrive::new(self.clone(), id.try_into()?))
    }

    /// Uploads `content` as `dir/name`, refusing to overwrite an existing object.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::Upload`] naming the key if the store rejects the upload,
    /// including when the key is already taken.
    pub async fn upload_file(
        &self,
        tenant: &TenantId,
        dir: &str,
        name: &str,
        content: Vec<u8>,
    ) -> Result<String, DriveError> {
        let key = file_key(tenant, dir, name)?;
        let size = content.len();

        let path = self
            .store
            .upload(key.as_str(), content, UploadOptions::new())
            .await
            .raise("upload_file", DriveError::upload(&key))?;

        info!(op = "upload_file", path = %key, size, "File uploaded");
        Ok(path)
    }

    /// The entries directly inside `dir`, at most one page of them.
    ///
    /// Folders appear as entries without an id. Nothing is filtered, markers included.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::List`] naming the prefix.
    pub async fn list_files(&self, tenant: &TenantId, dir: &str) -> Result<Vec<ListEntry>, DriveError> {
        let prefix = build_key(tenant, [dir])?;

        let entries = self
            .store
            .list(prefix.as_str(), ListOptions::new().limit(self.config.page_size))
            .await
            .raise("list_files", DriveError::list(&prefix))?;

        debug!(op = "list_files", path = %prefix, entries = entries.len(), "Directory listed");
        Ok(entries)
    }

    /// Renames `dir/old_name` to `dir/new_name` with one move call.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::Rename`] naming the source key.
    pub async fn rename_file(
        &self,
        tenant: &TenantId,
        dir: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<ObjectKey, DriveError> {
        let from = file_key(tenant, dir, old_name)?;
        let to = file_key(tenant, dir, new_name)?;
        if from == to {
            return Ok(to);
        }

        self.store
            .move_object(from.as_str(), to.as_str())
            .await
            .raise("rename_file", DriveError::rename(&from))?;

        info!(op = "rename_file", from = %from, to = %to, "File renamed");
        Ok(to)
    }

    /// # Errors
    ///
    /// Returns [`DriveError::Delete`] naming the key, also when it does not exist.
    pub async fn delete_file(&self, tenant: &TenantId, dir: &str, name: &str) -> Result<(), DriveError> {
        let key = file_key(tenant, dir, name)?;

        self.store
            .remove(&[key.as_str().to_owned()])
            .await
            .raise("delete_file", DriveError::delete(&key))?;

        info!(op = "delete_file", path = %key, "File deleted");
        Ok(())
    }

    /// Moves `src_dir/name` to `dst_dir/name` with one move call.
    ///
    /// Moving a file onto its own key is a no-op. Moving it back restores the original key
    /// with identical content.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::Move`] naming the source key.
    pub async fn move_file(
        &self,
        tenant: &TenantId,
        src_dir: &str,
        dst_dir: &str,
        name: &str,
    ) -> Result<ObjectKey, DriveError> {
        let from = file_key(tenant, src_dir, name)?;
        let to = file_key(tenant, dst_dir, name)?;
        if from == to {
            return Ok(to);
        }

        self.store
            .move_object(from.as_str(), to.as_str())
            .await
            .raise("move_file", DriveError::move_failed(&from))?;

        info!(op = "move_file", from = %from, to = %to, "File moved");
        Ok(to)
    }

    /// Copies `src_dir/name` to `dst_dir/name` by downloading the full content and uploading it
    /// again, overwriting any existing destination.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::CopyRead`] naming the source if the download fails and
    /// [`DriveError::CopyWrite`] naming the destination if the upload fails.
    pub async fn copy_file(
        &self,
        tenant: &TenantId,
        src_dir: &str,
        dst_dir: &str,
        name: &str,
    ) -> Result<ObjectKey, DriveError> {
        let from = file_key(tenant, src_dir, name)?;
        let to = file_key(tenant, dst_dir, name)?;

        let content = self
            .store
            .download(from.as_str())
            .await
            .raise("copy_file", DriveError::copy_read(&from))?;
        let size = content.len();

        self.store
            .upload(to.as_str(), content, UploadOptions::new().upsert(true))
            .await
            .raise("copy_file", DriveError::copy_write(&to))?;

        info!(op = "copy_file", from = %from, to = %to, size, "File copied");
        Ok(to)
    }

    /// # Errors
    ///
    /// Returns [`DriveError::Download`] naming the key.
    pub async fn download_file(
        &self,
        tenant: &TenantId,
        dir: &str,
        name: &str,
    ) -> Result<Vec<u8>, DriveError> {
        let key = file_key(tenant, dir, name)?;

        let content = self
            .store
            .download(key.as_str())
            .await
            .raise("download_file", DriveError::download(&key))?;

        debug!(op = "download_file", path = %key, size = content.len(), "File downloaded");
        Ok(content)
    }

    /// Lists one folder level to exhaustion, one page at a time.
    pub(crate) async fn list_all(&self, prefix: &ObjectKey) -> Result<Vec<ListEntry>, StoreError> {
        let page_size = self.config.page_size;
        let mut entries: Vec<ListEntry> = Vec::new();

        loop {
            let options = ListOptions::new().limit(page_size).offset(entries.len());
            let page = self.store.list(prefix.as_str(), options).await?;
            let exhausted = page.len() < page_size;
            entries.extend(page);
            if exhausted {
                break;
            }
        }

        debug!(path = %prefix, entries = entries.len(), "Folder level listed");
        Ok(entries)
    }
}
