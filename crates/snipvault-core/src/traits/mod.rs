//! Cross-crate trait seams.

pub mod blob;

pub use blob::{BlobMeta, BlobStore};
