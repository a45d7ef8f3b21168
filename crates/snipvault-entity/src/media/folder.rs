//! Media folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A media folder; `parent_id` makes these form a tree per owner.
///
/// Soft-deleting a media folder cascades the *same* `deleted_at` timestamp
/// onto its descendants and contained files, so restore can tell cascade
/// victims apart from files that were deleted on their own beforehand.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaFolder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder display name.
    pub name: String,
    /// Display color (hex string).
    pub color: String,
    /// Display icon name.
    pub icon: String,
    /// Parent folder (None for roots).
    pub parent_id: Option<Uuid>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MediaFolder {
    /// Whether the folder is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new media folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMediaFolder {
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
    /// Parent folder.
    pub parent_id: Option<Uuid>,
}
