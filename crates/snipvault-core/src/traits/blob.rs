//! Blob store trait for pluggable media storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppResult;

/// Metadata about a stored media object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobMeta {
    /// Object key within the store.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp, if the backend reports one.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Trait for media blob storage backends.
///
/// Implementations exist for the local filesystem and, behind the `s3`
/// feature of `snipvault-storage`, S3-compatible stores. The trait is
/// defined here so services depend on the seam, not a concrete backend.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object under the given key.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read an object into memory.
    async fn read(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the object at the given key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Get metadata for an object.
    async fn metadata(&self, key: &str) -> AppResult<BlobMeta>;
}
