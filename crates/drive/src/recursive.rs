//! Directory rename and delete, composed from single-object store calls.
//!
//! The store has no directory primitive and no multi-object transaction, so both operations
//! walk the prefix level by level over an explicit stack and act on each file as it is found.
//! They stop at the first failing object and leave everything before it applied; callers retry.

use crate::engine::Drive;
use crate::error::{DriveError, StoreResultExt};
use crate::key::{ObjectKey, TenantId, build_key};
use serde::Serialize;
use strata_object_store::{ListEntry, ListOptions, ObjectStore};
use tracing::{debug, info, warn};

/// Outcome of a recursive delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    /// Objects removed, directory markers included.
    pub removed: usize,
    /// Entry names still listed under the directory after the delete.
    pub residue: Vec<String>,
}

impl DeleteReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.residue.is_empty()
    }
}

impl<S: ObjectStore> Drive<S> {
    /// Moves every object below `old_dir` to the same relative key below `new_dir`,
    /// markers and nested folders included, and returns the number of objects moved.
    ///
    /// Renaming into an existing directory merges the two: a source marker whose destination
    /// marker already exists is removed instead of moved and not counted.
    ///
    /// Not atomic. On failure the objects moved so far stay moved and the remaining ones stay
    /// put; rerunning the rename picks up where it stopped.
    ///
    /// # Errors
    ///
    /// - [`DriveError::RenameIntoSelf`] if `new_dir` equals or lies inside `old_dir`.
    /// - [`DriveError::List`] naming the prefix that could not be listed.
    /// - [`DriveError::Rename`] naming the first file that could not be moved.
    /// - [`DriveError::DepthExceeded`] if nesting exceeds the configured limit.
    pub async fn rename_directory(
        &self,
        tenant: &TenantId,
        old_dir: &str,
        new_dir: &str,
    ) -> Result<usize, DriveError> {
        let from = build_key(tenant, [old_dir])?;
        let to = build_key(tenant, [new_dir])?;
        if to.is_within(&from) {
            return Err(DriveError::RenameIntoSelf {
                message: format!("{from} -> {to}").into(),
                context: None,
            });
        }

        let mut moved = 0;
        let mut stack = vec![(from.clone(), 0)];
        while let Some((prefix, depth)) = stack.pop() {
            let entries = self.level("rename_directory", &prefix).await?;

            let mut folders = Vec::new();
            for entry in entries {
                let source = prefix.child(&entry.name);
                if entry.is_folder() {
                    folders.push((self.descend(source, depth)?, depth + 1));
                    continue;
                }

                let Some(target) = source.rebase(&from, &to) else { continue };
                match self.store.move_object(source.as_str(), target.as_str()).await {
                    // The destination folder already exists; its marker stands in for ours.
                    Err(err) if err.is_already_exists() && self.is_marker(&entry.name) => {
                        self.store
                            .remove(&[source.as_str().to_owned()])
                            .await
                            .raise("rename_directory", DriveError::rename(&source))?;
                        debug!(op = "rename_directory", path = %source, "Marker merged into destination");
                    },
                    result => {
                        result.raise("rename_directory", DriveError::rename(&source))?;
                        moved += 1;
                    },
                }
            }
            stack.extend(folders.into_iter().rev());
        }

        info!(op = "rename_directory", from = %from, to = %to, moved, "Directory renamed");
        Ok(moved)
    }

    /// Removes every object below `dir`: the files of each level as soon as they are listed,
    /// then the sub-folders. Finally the directory is listed once more; anything still there
    /// is reported as residue and logged, not treated as a failure.
    ///
    /// # Errors
    ///
    /// - [`DriveError::List`] naming the prefix that could not be listed, including the final
    ///   verification listing.
    /// - [`DriveError::Delete`] naming the first file that could not be removed.
    /// - [`DriveError::DepthExceeded`] if nesting exceeds the configured limit.
    pub async fn delete_directory(&self, tenant: &TenantId, dir: &str) -> Result<DeleteReport, DriveError> {
        let root = build_key(tenant, [dir])?;

        let mut removed = 0;
        let mut stack = vec![(root.clone(), 0)];
        while let Some((prefix, depth)) = stack.pop() {
            let entries = self.level("delete_directory", &prefix).await?;

            let mut folders = Vec::new();
            for entry in entries {
                let key = prefix.child(&entry.name);
                if entry.is_folder() {
                    folders.push((self.descend(key, depth)?, depth + 1));
                    continue;
                }

                self.store
                    .remove(&[key.as_str().to_owned()])
                    .await
                    .raise("delete_directory", DriveError::delete(&key))?;
                removed += 1;
            }
            stack.extend(folders.into_iter().rev());
        }

        let residue: Vec<String> = self
            .store
            .list(root.as_str(), ListOptions::new().limit(self.config.page_size))
            .await
            .raise("delete_directory", DriveError::list(&root))?
            .into_iter()
            .map(|entry| entry.name)
            .collect();

        if residue.is_empty() {
            info!(op = "delete_directory", path = %root, removed, "Directory deleted");
        } else {
            warn!(
                op = "delete_directory",
                path = %root,
                removed,
                residue = ?residue,
                "Directory still lists entries after delete"
            );
        }

        Ok(DeleteReport { removed, residue })
    }

    async fn level(&self, op: &'static str, prefix: &ObjectKey) -> Result<Vec<ListEntry>, DriveError> {
        self.list_all(prefix).await.raise(op, DriveError::list(prefix))
    }

    /// Checks that `folder`, found at `depth`, may still be entered.
    pub(crate) fn descend(&self, folder: ObjectKey, depth: usize) -> Result<ObjectKey, DriveError> {
        if depth >= self.config.max_depth {
            return Err(DriveError::DepthExceeded {
                message: folder.into_string().into(),
                context: Some(format!("limit {}", self.config.max_depth).into()),
            });
        }
        Ok(folder)
    }
}
