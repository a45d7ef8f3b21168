//! Media file and folder business logic.

pub mod service;

pub use service::{CreateMediaFolderRequest, MediaService, UpdateMediaFileRequest, UploadMediaRequest};
