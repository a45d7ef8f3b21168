//! Snippet folder business logic.

pub mod service;

pub use service::{CreateFolderRequest, FolderService, UpdateFolderRequest};
