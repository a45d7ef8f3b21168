//! Business logic services for SnipVault.
//!
//! Services own the rules: ownership checks, name-conflict detection, the
//! soft-delete lifecycle, the media PIN gate, and import/export codecs.
//! They orchestrate repositories and the blob store; HTTP concerns stay in
//! `snipvault-api`.

pub mod auth;
pub mod category;
pub mod context;
pub mod folder;
pub mod media;
pub mod pin;
pub mod recycle;
pub mod snippet;
pub mod transfer;

pub use context::RequestContext;
