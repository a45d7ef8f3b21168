//! Snippet folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder grouping snippets for one owner.
///
/// Folder names are unique per owner, case-insensitively, among rows that
/// are not soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display color (hex string, e.g. `#3B82F6`).
    pub color: String,
    /// Display icon name.
    pub icon: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Whether the folder is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
}
