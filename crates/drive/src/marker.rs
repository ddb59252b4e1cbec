//! Directory markers: zero-byte objects that keep an otherwise empty prefix visible to listings.
//!
//! A marker is never read. Recursive deletes remove it like any other file, and a missing
//! marker is not an error anywhere.

use crate::engine::Drive;
use crate::error::{DriveError, StoreResultExt};
use crate::key::{ObjectKey, TenantId, build_key};
use strata_object_store::{ObjectStore, UploadOptions};
use tracing::info;

pub const MARKER_NAME: &str = ".keep";
pub const MARKER_CONTENT_TYPE: &str = "application/x-empty";

impl<S: ObjectStore> Drive<S> {
    /// Makes `dir` observable by uploading an empty marker object into it.
    ///
    /// Idempotent: an existing marker is overwritten rather than reported as a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::DirectoryCreate`] naming the marker key if the upload fails,
    /// and [`DriveError::InvalidPath`] if `dir` addresses the tenant root.
    pub async fn create_directory(&self, tenant: &TenantId, dir: &str) -> Result<ObjectKey, DriveError> {
        let prefix = build_key(tenant, [dir])?;
        if prefix.depth() == 0 {
            return Err(DriveError::InvalidPath {
                message: dir.to_owned().into(),
                context: Some("Directory path is empty after sanitization".into()),
            });
        }
        let key = prefix.child(&self.config.marker_name);

        let options = UploadOptions::new()
            .content_type(self.config.marker_content_type.clone())
            .upsert(true);
        self.store
            .upload(key.as_str(), Vec::new(), options)
            .await
            .raise("create_directory", DriveError::directory_create(&key))?;

        info!(op = "create_directory", path = %prefix, "Directory created");
        Ok(prefix)
    }

    /// Whether a listed file name is this drive's directory marker.
    pub(crate) fn is_marker(&self, name: &str) -> bool {
        name == self.config.marker_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_object_store::{ListOptions, MemoryStore};

    fn drive() -> (MemoryStore, Drive<MemoryStore>) {
        let store = MemoryStore::new();
        let drive = Drive::builder().store(store.clone()).build().unwrap();
        (store, drive)
    }

    #[tokio::test]
    async fn marker_makes_empty_prefix_listable() {
        let (store, drive) = drive();
        let alice = TenantId::try_from("alice").unwrap();

        let dir = drive.create_directory(&alice, "Vidéos").await.unwrap();
        assert_eq!(dir.as_str(), "alice/Videos");
        assert_eq!(store.download("alice/Videos/.keep").await.unwrap(), Vec::<u8>::new());

        let root = store.list("alice", ListOptions::new()).await.unwrap();
        assert_eq!(root.len(), 1);
        assert!(root[0].is_folder());
    }

    #[tokio::test]
    async fn creating_twice_is_not_a_conflict() {
        let (store, drive) = drive();
        let alice = TenantId::try_from("alice").unwrap();

        drive.create_directory(&alice, "a").await.unwrap();
        drive.create_directory(&alice, "a").await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn tenant_root_is_not_a_directory_to_create() {
        let (store, drive) = drive();
        let alice = TenantId::try_from("alice").unwrap();

        let err = drive.create_directory(&alice, "/").await.unwrap_err();
        assert_eq!(err.kind(), "InvalidPath");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn upload_failure_names_the_marker_key() {
        let (store, drive) = drive();
        let alice = TenantId::try_from("alice").unwrap();
        store.fail_on(strata_object_store::StoreOp::Upload, "alice/a/.keep");

        let err = drive.create_directory(&alice, "a").await.unwrap_err();
        assert_eq!(err.kind(), "DirectoryCreate");
        assert_eq!(err.path(), Some("alice/a/.keep"));
    }
}
