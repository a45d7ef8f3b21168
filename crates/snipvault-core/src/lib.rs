//! Core configuration, types, traits, and error handling for SnipVault.
//!
//! Every other crate in the workspace depends on this one. It carries the
//! unified [`error::AppError`] type, the configuration schema, shared
//! pagination/sorting types, and the [`traits::blob::BlobStore`] seam used
//! by the media subsystem.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, AppResult, ErrorKind};
