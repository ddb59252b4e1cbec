//! # Object Store
//!
//! The contract this workspace consumes from a flat, key-addressed blob store: upload, list,
//! move, remove, download and public URL resolution over a single bucket namespace. There
//! is no directory primitive; prefixes show up in listings as entries without an identifier.
//!
//! The `memory` feature (on by default) adds [`MemoryStore`], an in-memory bucket with the
//! same listing semantics plus fault injection and a call journal for tests.
//!
//! ```rust
//! use strata_object_store::{ListOptions, MemoryStore, ObjectStore, StoreError, UploadOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StoreError> {
//!     let store = MemoryStore::new();
//!     store.upload("alice/notes/todo.txt", b"milk".to_vec(), UploadOptions::new()).await?;
//!     store.move_object("alice/notes/todo.txt", "alice/archive/todo.txt").await?;
//!
//!     assert_eq!(store.download("alice/archive/todo.txt").await?, b"milk");
//!     assert!(store.list("alice/notes", ListOptions::new()).await?.is_empty());
//!     Ok(())
//! }
//! ```

mod error;
#[cfg(feature = "memory")]
mod memory;
mod store;
mod types;

pub use error::{StoreError, StoreErrorExt};
#[cfg(feature = "memory")]
pub use memory::{MemoryStore, MemoryStoreConfig, StoreCall, StoreOp};
pub use store::ObjectStore;
pub use types::{ListEntry, ListOptions, ObjectMetadata, UploadOptions};
