use async_trait::async_trait;

use super::errors::StorageError;

/// Byte storage keyed by a relative path under a fixed root.
///
/// Paths are forward-slash separated and relative to the store's root; an
/// implementation must refuse any path that resolves outside that root with
/// [`StorageError::InvalidPath`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` at `path`, replacing any existing object, and returns the
    /// normalized path the object was stored under.
    async fn store(&self, bytes: Vec<u8>, path: &str) -> Result<String, StorageError>;

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Removing an absent object succeeds.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Public reference for `path`. Does not check that the object exists.
    fn url_for(&self, path: &str) -> String;

    /// Inverse of [`BlobStore::url_for`]; references that are not URLs are
    /// returned as paths unchanged.
    fn path_from_url(&self, url: &str) -> String;
}
