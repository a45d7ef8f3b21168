//! Media entities: files and their folder tree.

pub mod file;
pub mod folder;

pub use file::{CreateMediaFile, MediaFile, MediaKind};
pub use folder::{CreateMediaFolder, MediaFolder};
