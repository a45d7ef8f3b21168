//! Media storage facade over the configured blob store.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use snipvault_core::config::StorageConfig;
use snipvault_core::error::{AppError, AppResult};
use snipvault_core::traits::BlobStore;

use crate::providers::local::LocalBlobStore;

/// Routes media blob operations to the configured backend and owns the
/// key/URL scheme: objects are stored under `<uuid>_<sanitized-name>` and
/// addressed publicly as `<public_base_url>/<key>`.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    store: Arc<dyn BlobStore>,
    public_base_url: String,
    max_upload_size_bytes: u64,
}

impl MediaStorage {
    /// Build the backend named by `default_provider` in the configuration.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn BlobStore> = match config.default_provider.as_str() {
            "local" => Arc::new(LocalBlobStore::new(&config.local.root_path).await?),
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::s3::S3BlobStore::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: {other}"
                )))
            }
        };
        Ok(Self::new(
            store,
            &config.public_base_url,
            config.max_upload_size_bytes,
        ))
    }

    /// Wrap an already-built backend.
    pub fn new(store: Arc<dyn BlobStore>, public_base_url: &str, max_upload_size_bytes: u64) -> Self {
        Self {
            store,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_upload_size_bytes,
        }
    }

    /// The backend type name ("local" or "s3").
    pub fn provider_type(&self) -> &str {
        self.store.provider_type()
    }

    /// Whether the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }

    /// Store a new media blob and return `(object_key, public_url)`.
    pub async fn store_object(&self, file_name: &str, data: Bytes) -> AppResult<(String, String)> {
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }
        let key = object_key(file_name);
        let url = self.public_url(&key);
        self.store.write(&key, data).await?;
        Ok((key, url))
    }

    /// Read a media blob by object key.
    pub async fn read_object(&self, key: &str) -> AppResult<Bytes> {
        self.store.read(key).await
    }

    /// Delete a media blob by object key. Missing objects are not an error;
    /// purge must succeed even when the blob is already gone.
    pub async fn delete_object(&self, key: &str) -> AppResult<()> {
        match self.store.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind == snipvault_core::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// The public URL for an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// The configured upload size ceiling, in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }
}

/// Build a collision-free object key from the original file name. The uuid
/// prefix keeps names unique; the sanitized original name keeps keys
/// debuggable.
fn object_key(file_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name))
}

/// Replace path separators and control characters so a hostile file name
/// cannot escape the storage root or break the URL scheme.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '?' | '#' | '%' | '&' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches('.').trim();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("a\\b:c.png"), "a_b_c.png");
        assert_eq!(sanitize_file_name("..."), "file");
        assert_eq!(sanitize_file_name("cat.png"), "cat.png");
    }

    #[test]
    fn test_object_key_ends_with_name() {
        let key = object_key("cat.png");
        assert!(key.ends_with("_cat.png"));
        assert!(!key.contains('/'));
    }

    #[tokio::test]
    async fn test_store_and_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let media = MediaStorage::new(Arc::new(store), "http://localhost:8420/media/", 1024);

        let (key, url) = media
            .store_object("cat.png", Bytes::from("img"))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:8420/media/"));
        assert!(url.ends_with(&key));

        assert_eq!(media.read_object(&key).await.unwrap(), Bytes::from("img"));
        media.delete_object(&key).await.unwrap();
        // Second delete hits the missing-object path and still succeeds.
        media.delete_object(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let media = MediaStorage::new(Arc::new(store), "http://localhost:8420/media", 4);

        let err = media
            .store_object("big.png", Bytes::from("too big"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, snipvault_core::ErrorKind::Validation);
    }
}
