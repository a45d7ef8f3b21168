//! Media file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// The kind of media a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// A media file (image or video) stored in the PIN-gated media area.
///
/// The blob itself lives in a [`BlobStore`](snipvault_core::traits::BlobStore)
/// backend; `file_url` is the public address the object was registered
/// under, and the object key is derived from its last path segment when the
/// row is purged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaFile {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file owner.
    pub owner_id: Uuid,
    /// Original file name (including extension).
    pub file_name: String,
    /// Whether this is an image or a video.
    pub file_type: MediaKind,
    /// Public URL of the stored blob.
    pub file_url: String,
    /// Blob size in bytes.
    pub file_size: i64,
    /// The media folder containing this file, if any.
    pub media_folder_id: Option<Uuid>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Whether the owner starred this file.
    pub is_favorite: bool,
    /// Playback duration in seconds (videos only).
    pub duration: Option<f64>,
    /// When the file was registered.
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MediaFile {
    /// Whether the file is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Derive the blob object key from the stored URL (last path segment).
    pub fn object_key(&self) -> Option<&str> {
        let trimmed = self.file_url.trim_end_matches('/');
        let without_scheme = match trimmed.find("://") {
            Some(idx) => &trimmed[idx + 3..],
            None => trimmed,
        };
        let (_, key) = without_scheme.rsplit_once('/')?;
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

/// Data required to register a new media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMediaFile {
    /// The file owner.
    pub owner_id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// Image or video.
    pub file_type: MediaKind,
    /// Public URL of the stored blob.
    pub file_url: String,
    /// Blob size in bytes.
    pub file_size: i64,
    /// Containing media folder.
    pub media_folder_id: Option<Uuid>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Playback duration in seconds (videos only).
    pub duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(url: &str) -> MediaFile {
        MediaFile {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            file_name: "cat.png".into(),
            file_type: MediaKind::Image,
            file_url: url.into(),
            file_size: 1024,
            media_folder_id: None,
            tags: None,
            is_favorite: false,
            duration: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_object_key_is_last_path_segment() {
        let file = sample("https://cdn.example.com/media/ab12/cat.png");
        assert_eq!(file.object_key(), Some("cat.png"));
    }

    #[test]
    fn test_object_key_ignores_trailing_slash() {
        let file = sample("https://cdn.example.com/media/cat.png/");
        assert_eq!(file.object_key(), Some("cat.png"));
    }

    #[test]
    fn test_object_key_rejects_bare_origin() {
        let file = sample("https://cdn.example.com");
        assert_eq!(file.object_key(), None);
    }
}
