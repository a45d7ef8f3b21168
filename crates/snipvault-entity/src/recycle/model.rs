//! Recycle-bin aggregate model.
//!
//! A proper tagged union replaces the original system's duck-typed
//! "recycle bin item" (a `type` string glued onto five unrelated shapes in
//! the UI layer). Every soft-deleted row enters the bin as exactly one
//! [`RecycleBinItem`] variant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::folder::Folder;
use crate::media::{MediaFile, MediaFolder};
use crate::snippet::Snippet;

/// The entity kinds that participate in the soft-delete lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecycleKind {
    /// A code snippet.
    Snippet,
    /// A snippet folder.
    Folder,
    /// A snippet category.
    Category,
    /// A media file.
    MediaFile,
    /// A media folder.
    MediaFolder,
}

impl fmt::Display for RecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snippet => write!(f, "snippet"),
            Self::Folder => write!(f, "folder"),
            Self::Category => write!(f, "category"),
            Self::MediaFile => write!(f, "media_file"),
            Self::MediaFolder => write!(f, "media_folder"),
        }
    }
}

impl FromStr for RecycleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snippet" => Ok(Self::Snippet),
            "folder" => Ok(Self::Folder),
            "category" => Ok(Self::Category),
            "media_file" => Ok(Self::MediaFile),
            "media_folder" => Ok(Self::MediaFolder),
            other => Err(format!("unknown recycle kind '{other}'")),
        }
    }
}

/// Identifies one row in the recycle bin for restore/purge requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecycleSelector {
    /// The entity kind.
    pub kind: RecycleKind,
    /// The row id.
    pub id: Uuid,
}

/// One soft-deleted row, tagged by its entity kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecycleBinItem {
    /// A soft-deleted snippet.
    Snippet(Snippet),
    /// A soft-deleted snippet folder.
    Folder(Folder),
    /// A soft-deleted category.
    Category(Category),
    /// A soft-deleted media file.
    MediaFile(MediaFile),
    /// A soft-deleted media folder.
    MediaFolder(MediaFolder),
}

impl RecycleBinItem {
    /// The kind discriminant of this item.
    pub fn kind(&self) -> RecycleKind {
        match self {
            Self::Snippet(_) => RecycleKind::Snippet,
            Self::Folder(_) => RecycleKind::Folder,
            Self::Category(_) => RecycleKind::Category,
            Self::MediaFile(_) => RecycleKind::MediaFile,
            Self::MediaFolder(_) => RecycleKind::MediaFolder,
        }
    }

    /// The underlying row id.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Snippet(s) => s.id,
            Self::Folder(f) => f.id,
            Self::Category(c) => c.id,
            Self::MediaFile(m) => m.id,
            Self::MediaFolder(m) => m.id,
        }
    }

    /// When the row was soft-deleted. Items only enter the bin with a
    /// non-null marker, so a missing one is treated as the epoch.
    pub fn deleted_at(&self) -> DateTime<Utc> {
        let marker = match self {
            Self::Snippet(s) => s.deleted_at,
            Self::Folder(f) => f.deleted_at,
            Self::Category(c) => c.deleted_at,
            Self::MediaFile(m) => m.deleted_at,
            Self::MediaFolder(m) => m.deleted_at,
        };
        marker.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// The selector addressing this item.
    pub fn selector(&self) -> RecycleSelector {
        RecycleSelector {
            kind: self.kind(),
            id: self.id(),
        }
    }
}

/// Per-kind row counts for the recycle-bin view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecycleCounts {
    /// Soft-deleted snippets.
    pub snippets: u64,
    /// Soft-deleted snippet folders.
    pub folders: u64,
    /// Soft-deleted categories.
    pub categories: u64,
    /// Soft-deleted media files.
    pub media_files: u64,
    /// Soft-deleted media folders.
    pub media_folders: u64,
}

impl RecycleCounts {
    /// Total rows across all kinds.
    pub fn total(&self) -> u64 {
        self.snippets + self.folders + self.categories + self.media_files + self.media_folders
    }
}

/// The full recycle-bin view for one owner, grouped by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecycleBinContents {
    /// Soft-deleted snippets.
    pub snippets: Vec<Snippet>,
    /// Soft-deleted snippet folders.
    pub folders: Vec<Folder>,
    /// Soft-deleted categories.
    pub categories: Vec<Category>,
    /// Soft-deleted media files.
    pub media_files: Vec<MediaFile>,
    /// Soft-deleted media folders.
    pub media_folders: Vec<MediaFolder>,
    /// Per-kind counts.
    pub counts: RecycleCounts,
    /// Total item count.
    pub total: u64,
}

impl RecycleBinContents {
    /// Assemble the grouped view and derive the counts.
    pub fn new(
        snippets: Vec<Snippet>,
        folders: Vec<Folder>,
        categories: Vec<Category>,
        media_files: Vec<MediaFile>,
        media_folders: Vec<MediaFolder>,
    ) -> Self {
        let counts = RecycleCounts {
            snippets: snippets.len() as u64,
            folders: folders.len() as u64,
            categories: categories.len() as u64,
            media_files: media_files.len() as u64,
            media_folders: media_folders.len() as u64,
        };
        Self {
            snippets,
            folders,
            categories,
            media_files,
            media_folders,
            total: counts.total(),
            counts,
        }
    }

    /// All items in the bin as one flat tagged list, newest deletion first.
    pub fn items(&self) -> Vec<RecycleBinItem> {
        let mut out: Vec<RecycleBinItem> = Vec::with_capacity(self.total as usize);
        out.extend(self.snippets.iter().cloned().map(RecycleBinItem::Snippet));
        out.extend(self.folders.iter().cloned().map(RecycleBinItem::Folder));
        out.extend(self.categories.iter().cloned().map(RecycleBinItem::Category));
        out.extend(self.media_files.iter().cloned().map(RecycleBinItem::MediaFile));
        out.extend(
            self.media_folders
                .iter()
                .cloned()
                .map(RecycleBinItem::MediaFolder),
        );
        out.sort_by(|a, b| b.deleted_at().cmp(&a.deleted_at()));
        out
    }

    /// All selectors in the bin (used by "clear all").
    pub fn selectors(&self) -> Vec<RecycleSelector> {
        self.items().iter().map(RecycleBinItem::selector).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(deleted: bool) -> Snippet {
        Snippet {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "t".into(),
            description: None,
            code: "c".into(),
            language: "rust".into(),
            tags: None,
            is_public: false,
            is_favorite: false,
            folder_id: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: deleted.then(Utc::now),
        }
    }

    #[test]
    fn test_item_serializes_with_kind_tag() {
        let item = RecycleBinItem::Snippet(snippet(true));
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["kind"], "snippet");
        assert_eq!(json["language"], "rust");
    }

    #[test]
    fn test_counts_match_groups() {
        let contents = RecycleBinContents::new(
            vec![snippet(true), snippet(true)],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(contents.counts.snippets, 2);
        assert_eq!(contents.total, 2);
        assert_eq!(contents.selectors().len(), 2);
        assert!(contents
            .selectors()
            .iter()
            .all(|s| s.kind == RecycleKind::Snippet));
    }

    #[test]
    fn test_items_are_flat_and_newest_first() {
        let mut old = snippet(true);
        old.deleted_at = Some(Utc::now() - chrono::Duration::hours(2));
        let recent = snippet(true);
        let contents = RecycleBinContents::new(
            vec![old.clone(), recent.clone()],
            vec![],
            vec![],
            vec![],
            vec![],
        );

        let items = contents.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), recent.id);
        assert_eq!(items[1].id(), old.id);
        assert!(items.iter().all(|i| i.kind() == RecycleKind::Snippet));
        assert_eq!(items[0].selector().id, recent.id);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            RecycleKind::Snippet,
            RecycleKind::Folder,
            RecycleKind::Category,
            RecycleKind::MediaFile,
            RecycleKind::MediaFolder,
        ] {
            let parsed: RecycleKind = kind.to_string().parse().expect("parse");
            assert_eq!(parsed, kind);
        }
    }
}
