use crate::error::StoreError;
use crate::types::{ListEntry, ListOptions, UploadOptions};
use std::fmt::Debug;
use std::future::Future;

/// The primitives of a flat, key-addressed object store.
///
/// Keys are slash-delimited strings inside a single bucket; the store has no notion of
/// directories beyond reporting prefixes as identifier-less [`ListEntry`] values. Every
/// method is one network round-trip and may fail independently.
///
/// Implementations are shared across concurrent operations, hence `Send + Sync`.
pub trait ObjectStore: Debug + Send + Sync + 'static {
    /// Stores `content` at `key` and returns the stored path.
    fn upload(
        &self,
        key: &str,
        content: Vec<u8>,
        options: UploadOptions,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Lists the entries directly below `prefix` (one level, not recursive).
    fn list(
        &self,
        prefix: &str,
        options: ListOptions,
    ) -> impl Future<Output = Result<Vec<ListEntry>, StoreError>> + Send;

    /// Moves a single object from one key to another.
    fn move_object(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn remove(&self, keys: &[String]) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn download(&self, key: &str) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send;

    /// Resolves the public locator of `key`.
    fn public_url(&self, key: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
}
