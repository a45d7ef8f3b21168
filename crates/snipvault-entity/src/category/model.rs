//! Snippet category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A category labeling snippets for one owner.
///
/// Like folders, names are unique per owner (case-insensitive) among
/// non-deleted rows. Categories additionally carry a manual sort order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// The category owner.
    pub owner_id: Uuid,
    /// Category display name.
    pub name: String,
    /// Display color (hex string).
    pub color: String,
    /// Display icon name.
    pub icon: String,
    /// Manual ordering position.
    pub sort_order: i32,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Whether the category is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// The category owner.
    pub owner_id: Uuid,
    /// Category display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
}
