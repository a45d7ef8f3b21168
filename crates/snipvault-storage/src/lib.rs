//! Blob storage backends for media objects.
//!
//! Snippet content lives in Postgres; only media files (images and videos)
//! are stored as blobs. [`MediaStorage`] wraps a single configured
//! [`BlobStore`](snipvault_core::traits::BlobStore) backend and owns object
//! key generation and public URL mapping.

pub mod manager;
pub mod providers;

pub use manager::MediaStorage;
pub use providers::local::LocalBlobStore;
#[cfg(feature = "s3")]
pub use providers::s3::S3BlobStore;
