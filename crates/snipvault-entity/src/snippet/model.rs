//! Snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A code snippet stored in SnipVault.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// The snippet owner.
    pub owner_id: Uuid,
    /// Snippet title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The snippet source code.
    pub code: String,
    /// Language identifier (e.g. "rust", "python").
    pub language: String,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Whether the snippet is publicly shareable.
    pub is_public: bool,
    /// Whether the owner starred this snippet.
    pub is_favorite: bool,
    /// The folder containing this snippet, if any.
    pub folder_id: Option<Uuid>,
    /// The category assigned to this snippet, if any.
    pub category_id: Option<Uuid>,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; non-null means the row sits in the recycle bin.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Snippet {
    /// Whether the snippet is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the snippet may be served without authentication.
    pub fn is_publicly_visible(&self) -> bool {
        self.is_public && self.deleted_at.is_none()
    }
}

/// Data required to create a new snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippet {
    /// The snippet owner.
    pub owner_id: Uuid,
    /// Snippet title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// The source code.
    pub code: String,
    /// Language identifier.
    pub language: String,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Whether the snippet is public.
    pub is_public: bool,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Assigned category.
    pub category_id: Option<Uuid>,
}

/// Partial update for an existing snippet. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSnippet {
    /// New title.
    pub title: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New source code.
    pub code: Option<String>,
    /// New language.
    pub language: Option<String>,
    /// New tags.
    pub tags: Option<Option<Vec<String>>>,
    /// New public flag.
    pub is_public: Option<bool>,
    /// New folder assignment (`Some(None)` un-folders the snippet).
    pub folder_id: Option<Option<Uuid>>,
    /// New category assignment (`Some(None)` clears it).
    pub category_id: Option<Option<Uuid>>,
}

/// Sortable columns for snippet listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnippetSortKey {
    /// Creation time.
    #[default]
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Title, lexicographic.
    Title,
}

impl SnippetSortKey {
    /// The whitelisted column name for this key.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

/// Filters for the snippet list query. All fields are conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetFilter {
    /// Only snippets in this folder.
    pub folder_id: Option<Uuid>,
    /// Only snippets with this category.
    pub category_id: Option<Uuid>,
    /// Only snippets in this language.
    pub language: Option<String>,
    /// Only snippets carrying this tag.
    pub tag: Option<String>,
    /// Only favorites.
    #[serde(default)]
    pub favorites_only: bool,
    /// Substring match over title, description, and code.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snippet {
        Snippet {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "hello".into(),
            description: None,
            code: "fn main() {}".into(),
            language: "rust".into(),
            tags: None,
            is_public: true,
            is_favorite: false,
            folder_id: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_public_visibility_requires_not_deleted() {
        let mut snippet = sample();
        assert!(snippet.is_publicly_visible());
        snippet.deleted_at = Some(Utc::now());
        assert!(!snippet.is_publicly_visible());
        assert!(snippet.is_deleted());
    }
}
