use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Object metadata as reported by a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

/// One entry of a single-level listing.
///
/// Stores report real objects with an identifier and prefixes ("folders") without one;
/// [`ListEntry::is_folder`] relies on that and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<ObjectMetadata>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListEntry {
    /// A prefix entry, as stores report folders.
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: None, metadata: None, created_at: None }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.id.is_none()
    }

    /// Size in bytes, `0` when the store did not report one.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.metadata.as_ref().and_then(|m| m.size).unwrap_or(0)
    }
}

/// Paging window of a listing, applied after the store's name ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of entries; `None` leaves the page size to the store.
    pub limit: Option<usize>,
    /// Number of leading entries to skip.
    pub offset: usize,
}

impl ListOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self { limit: None, offset: 0 }
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: Option<Cow<'static, str>>,
    /// Overwrite an existing object instead of failing.
    pub upsert: bool,
}

impl UploadOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self { content_type: None, upsert: false }
    }

    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub const fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_id_is_a_folder() {
        let raw = r#"{"name":"photos","id":null,"metadata":null,"created_at":null}"#;
        let entry: ListEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_folder());
        assert_eq!(entry.size(), 0);
    }

    #[test]
    fn entry_with_id_is_a_file_regardless_of_name() {
        let raw = r#"{"name":"photos","id":"b1","metadata":{"size":42}}"#;
        let entry: ListEntry = serde_json::from_str(raw).unwrap();
        assert!(!entry.is_folder());
        assert_eq!(entry.size(), 42);
        assert!(entry.created_at.is_none());
    }
}
