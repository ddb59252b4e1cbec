use crate::engine::Drive;
use crate::error::DriveError;
use crate::key::{ObjectKey, TenantId, build_key};
use crate::recursive::DeleteReport;
use crate::tree::FolderNode;
use std::sync::Arc;
use strata_object_store::{ListEntry, ObjectStore};

/// A view of a [`Drive`] bound to one tenant.
///
/// Every path is resolved below the tenant's root; the id was validated once, when the view
/// was created. Cloning only bumps reference counts.
#[derive(Debug)]
pub struct TenantDrive<S> {
    drive: Drive<S>,
    tenant: Arc<TenantId>,
}

impl<S> Clone for TenantDrive<S> {
    fn clone(&self) -> Self {
        Self { drive: self.drive.clone(), tenant: Arc::clone(&self.tenant) }
    }
}

impl<S: ObjectStore> TenantDrive<S> {
    pub(crate) fn new(drive: Drive<S>, tenant: TenantId) -> Self {
        Self { drive, tenant: Arc::new(tenant) }
    }

    #[must_use]
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    #[must_use]
    pub const fn drive(&self) -> &Drive<S> {
        &self.drive
    }

    /// # Errors
    ///
    /// Returns [`DriveError::InvalidPath`] if a segment contains a `..` component.
    pub fn key<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<ObjectKey, DriveError> {
        build_key(&self.tenant, segments)
    }

    /// # Errors
    ///
    /// See [`Drive::create_directory`].
    pub async fn create_directory(&self, dir: &str) -> Result<ObjectKey, DriveError> {
        self.drive.create_directory(&self.tenant, dir).await
    }

    /// # Errors
    ///
    /// See [`Drive::upload_file`].
    pub async fn upload_file(&self, dir: &str, name: &str, content: Vec<u8>) -> Result<String, DriveError> {
        self.drive.upload_file(&self.tenant, dir, name, content).await
    }

    /// # Errors
    ///
    /// See [`Drive::list_files`].
    pub async fn list_files(&self, dir: &str) -> Result<Vec<ListEntry>, DriveError> {
        self.drive.list_files(&self.tenant, dir).await
    }

    /// # Errors
    ///
    /// See [`Drive::subtree`].
    pub async fn tree(&self) -> Result<FolderNode, DriveError> {
        self.drive.tree(&self.tenant).await
    }

    /// # Errors
    ///
    /// See [`Drive::subtree`].
    pub async fn subtree(&self, dir: &str) -> Result<FolderNode, DriveError> {
        self.drive.subtree(&self.tenant, dir).await
    }

    /// # Errors
    ///
    /// See [`Drive::rename_directory`].
    pub async fn rename_directory(&self, old_dir: &str, new_dir: &str) -> Result<usize, DriveError> {
        self.drive.rename_directory(&self.tenant, old_dir, new_dir).await
    }

    /// # Errors
    ///
    /// See [`Drive::rename_file`].
    pub async fn rename_file(
        &self,
        dir: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<ObjectKey, DriveError> {
        self.drive.rename_file(&self.tenant, dir, old_name, new_name).await
    }

    /// # Errors
    ///
    /// See [`Drive::delete_directory`].
    pub async fn delete_directory(&self, dir: &str) -> Result<DeleteReport, DriveError> {
        self.drive.delete_directory(&self.tenant, dir).await
    }

    /// # Errors
    ///
    /// See [`Drive::delete_file`].
    pub async fn delete_file(&self, dir: &str, name: &str) -> Result<(), DriveError> {
        self.drive.delete_file(&self.tenant, dir, name).await
    }

    /// # Errors
    ///
    /// See [`Drive::move_file`].
    pub async fn move_file(&self, src_dir: &str, dst_dir: &str, name: &str) -> Result<ObjectKey, DriveError> {
        self.drive.move_file(&self.tenant, src_dir, dst_dir, name).await
    }

    /// # Errors
    ///
    /// See [`Drive::copy_file`].
    pub async fn copy_file(&self, src_dir: &str, dst_dir: &str, name: &str) -> Result<ObjectKey, DriveError> {
        self.drive.copy_file(&self.tenant, src_dir, dst_dir, name).await
    }

    /// # Errors
    ///
    /// See [`Drive::download_file`].
    pub async fn download_file(&self, dir: &str, name: &str) -> Result<Vec<u8>, DriveError> {
        self.drive.download_file(&self.tenant, dir, name).await
    }
}
