//! Hierarchical directories over a flat, key-addressed object store.
//!
//! Object stores only know keys. This crate layers folders on top of them by convention:
//! a folder is a key prefix, an empty folder is kept visible by a zero-byte marker object, and
//! directory-level operations are compositions of per-object calls.
//!
//! # Core Features
//!
//! - **Key Safety**: User-supplied names are sanitized ([`sanitize`]) and composed into
//!   tenant-scoped keys ([`build_key`]); relative components cannot escape a tenant.
//! - **Tree Materialization**: [`Drive::tree`] rebuilds the nested folder/file tree from
//!   single-level listings, classifying folders purely by the absence of an object id.
//! - **Recursive Operations**: [`Drive::rename_directory`] and [`Drive::delete_directory`]
//!   walk a prefix over an explicit stack, failing fast and naming the offending key.
//! - **File Operations**: upload, list, rename, move, copy, download and delete of single files.
//!
//! # Architectural Overview
//!
//! 1.  **[`Drive`]**: The thread-safe handle, generic over any [`ObjectStore`].
//! 2.  **[`TenantDrive`]**: A view bound to one validated [`TenantId`].
//! 3.  **[`DriveBuilder`]**: A type-safe builder that requires a store before it builds.
//!
//! # Examples
//!
//! ```rust
//! use strata_drive::{Drive, DriveError};
//! use strata_object_store::MemoryStore;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DriveError> {
//!     let drive = Drive::builder().store(MemoryStore::new()).build()?;
//!     let alice = drive.tenant("alice")?;
//!
//!     alice.upload_file("projets/2024", "notes.md", b"# hi".to_vec()).await?;
//!     alice.upload_file("projets/2024/img", "logo.png", b"png".to_vec()).await?;
//!
//!     let moved = alice.rename_directory("projets", "archive/projets").await?;
//!     assert_eq!(moved, 2);
//!
//!     let report = alice.delete_directory("archive").await?;
//!     assert_eq!(report.removed, 2);
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```
//!
//! [`ObjectStore`]: strata_object_store::ObjectStore

mod builder;
mod config;
mod engine;
mod error;
mod key;
mod marker;
mod recursive;
mod sanitize;
mod tenant;
mod tree;

pub use builder::{DriveBuilder, NoStore, WithStore};
pub use config::DriveConfig;
pub use engine::{Drive, DriveInner};
pub use error::{DriveError, DriveErrorExt};
pub use key::{ObjectKey, TenantId, build_key};
pub use marker::{MARKER_CONTENT_TYPE, MARKER_NAME};
pub use recursive::DeleteReport;
pub use sanitize::{is_sanitized, sanitize};
pub use tenant::TenantDrive;
pub use tree::{FileNode, FolderNode, TreeNode};
