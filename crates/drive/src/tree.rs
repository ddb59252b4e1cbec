//! Materializes the nested folder/file tree of a prefix from single-level listings.
//!
//! Folders are never stored; an entry is a folder exactly when the store lists it without an
//! object id. The walk is depth-first over an explicit stack and costs one list round-trip per
//! folder (more only for folders larger than a page), plus one URL resolution per file.

use crate::engine::Drive;
use crate::error::{DriveError, StoreResultExt};
use crate::key::{ObjectKey, TenantId, build_key};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::mem;
use strata_object_store::ObjectStore;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Folder(FolderNode),
    File(FileNode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    /// The folder's key prefix, with a trailing slash.
    pub url_path: String,
    /// Children in the order the store listed them.
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    /// Size in bytes, `0` when the store reported none.
    pub size: u64,
    pub created_at: Option<DateTime<Utc>>,
    /// Public locator resolved by the store.
    pub url_path: String,
}

impl TreeNode {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => &file.name,
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    #[must_use]
    pub const fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }
}

impl FolderNode {
    /// Looks up a descendant by a slash-separated path of child names.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let mut names = path.split('/').filter(|n| !n.is_empty());
        let first = names.next()?;
        let mut node = self.children.iter().find(|c| c.name() == first)?;
        for name in names {
            node = node.as_folder()?.children.iter().find(|c| c.name() == name)?;
        }
        Some(node)
    }

    /// Number of files at every depth below this folder.
    #[must_use]
    pub fn count_files(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(folder) = stack.pop() {
            for child in &folder.children {
                match child {
                    TreeNode::Folder(sub) => stack.push(sub),
                    TreeNode::File(_) => count += 1,
                }
            }
        }
        count
    }
}

/// A folder still waiting to be listed.
struct Pending {
    key: ObjectKey,
    depth: usize,
    slot: usize,
}

impl<S: ObjectStore> Drive<S> {
    /// The whole tree of a tenant; the root is the tenant's implicit top folder.
    ///
    /// # Errors
    ///
    /// See [`Drive::subtree`].
    pub async fn tree(&self, tenant: &TenantId) -> Result<FolderNode, DriveError> {
        self.subtree(tenant, "").await
    }

    /// The tree rooted at `dir`.
    ///
    /// Directory markers are left out unless the drive was configured to show them. A missing
    /// prefix yields an empty folder, as the store cannot tell it apart from an empty one.
    ///
    /// # Errors
    ///
    /// Any failing list or URL resolution aborts the walk with
    /// [`DriveError::TreeTraversal`] naming the prefix or file key; no partial tree is
    /// returned. Nesting deeper than the configured limit yields [`DriveError::DepthExceeded`].
    pub async fn subtree(&self, tenant: &TenantId, dir: &str) -> Result<FolderNode, DriveError> {
        let root = build_key(tenant, [dir])?;

        // Folders are filled in discovery order; every folder's index is larger than its
        // parent's, so assembling back to front always moves finished subtrees.
        let mut arena = vec![FolderNode {
            name: root.name().to_owned(),
            url_path: root.folder_path(),
            children: Vec::new(),
        }];
        let mut links: Vec<(usize, usize)> = vec![(0, 0)];
        let mut stack = vec![Pending { key: root.clone(), depth: 0, slot: 0 }];

        while let Some(Pending { key, depth, slot }) = stack.pop() {
            let entries =
                self.list_all(&key).await.raise("tree", DriveError::tree_traversal(&key))?;

            let mut folders = Vec::new();
            for entry in entries {
                let child_key = key.child(&entry.name);

                if entry.is_folder() {
                    let child_key = self.descend(child_key, depth)?;
                    let index = arena.len();
                    arena.push(FolderNode {
                        name: entry.name,
                        url_path: child_key.folder_path(),
                        children: Vec::new(),
                    });
                    links.push((slot, arena[slot].children.len()));
                    arena[slot].children.push(TreeNode::Folder(FolderNode::default()));
                    folders.push(Pending { key: child_key, depth: depth + 1, slot: index });
                    continue;
                }

                if self.is_marker(&entry.name) && !self.config.show_markers {
                    continue;
                }

                let url_path = self
                    .store
                    .public_url(child_key.as_str())
                    .await
                    .raise("tree", DriveError::tree_traversal(&child_key))?;
                let size = entry.size();
                arena[slot].children.push(TreeNode::File(FileNode {
                    name: entry.name,
                    size,
                    created_at: entry.created_at,
                    url_path,
                }));
            }

            stack.extend(folders.into_iter().rev());
        }

        let folders = arena.len();
        for index in (1..arena.len()).rev() {
            let (parent, position) = links[index];
            let node = mem::take(&mut arena[index]);
            arena[parent].children[position] = TreeNode::Folder(node);
        }
        let tree = mem::take(&mut arena[0]);

        info!(op = "tree", path = %root, folders, files = tree.count_files(), "Tree materialized");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> TreeNode {
        TreeNode::File(FileNode { name: name.to_owned(), size: 1, created_at: None, url_path: String::new() })
    }

    fn folder(name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::Folder(FolderNode { name: name.to_owned(), url_path: format!("{name}/"), children })
    }

    #[test]
    fn find_and_count() {
        let TreeNode::Folder(root) =
            folder("root", vec![folder("a", vec![file("x"), folder("b", vec![file("y")])]), file("z")])
        else {
            unreachable!()
        };

        assert_eq!(root.count_files(), 3);
        assert_eq!(root.find("a/b/y").map(TreeNode::name), Some("y"));
        assert!(root.find("a/x/y").is_none());
        assert!(root.find("").is_none());
    }

    #[test]
    fn serializes_with_type_tags() {
        let json = serde_json::to_value(folder("a", vec![file("x.txt")])).unwrap();

        assert_eq!(json["type"], "folder");
        assert_eq!(json["urlPath"], "a/");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["createdAt"], serde_json::Value::Null);
    }
}
