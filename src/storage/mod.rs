//! Blob storage backends.

pub mod filesystem;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub use filesystem::FilesystemStore;

/// Blob store capability: durable byte storage addressed by opaque keys.
///
/// Backends provide their own concurrency safety for distinct keys; the
/// registry serializes conflicting mutations on the same record.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store content under the given key
    async fn put(&self, key: &str, content: Bytes) -> Result<()>;

    /// Retrieve content by key
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Check if key exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Delete content by key.
    ///
    /// Deleting a missing key is an error: the registry relies on delete
    /// failures being observable to keep metadata and blobs consistent.
    async fn delete(&self, key: &str) -> Result<()>;
}
