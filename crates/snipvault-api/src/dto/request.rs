//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use snipvault_core::types::{SortDirection, pagination};
use snipvault_entity::media::MediaKind;
use snipvault_entity::recycle::RecycleSelector;
use snipvault_entity::snippet::{SnippetFilter, SnippetSortKey};

/// Sign-in request body carrying a verified external identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Stable subject from the external identity provider.
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    /// Username.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

/// Snippet listing query parameters: filter + sort + pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetListQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Sort column.
    #[serde(default)]
    pub sort_by: SnippetSortKey,
    /// Sort direction.
    #[serde(default)]
    pub sort_dir: SortDirection,
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

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}

impl SnippetListQuery {
    /// Splits into the service-layer filter and page request.
    pub fn into_parts(self) -> (SnippetFilter, SnippetSortKey, SortDirection, pagination::PageRequest) {
        let filter = SnippetFilter {
            folder_id: self.folder_id,
            category_id: self.category_id,
            language: self.language,
            tag: self.tag,
            favorites_only: self.favorites_only,
            search: self.search,
        };
        let page = pagination::PageRequest::new(self.page, self.per_page);
        (filter, self.sort_by, self.sort_dir, page)
    }
}

/// Create snippet request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    /// Snippet title.
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// The source code.
    pub code: String,
    /// Language identifier.
    #[validate(length(min = 1))]
    pub language: String,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Whether the snippet is public.
    #[serde(default)]
    pub is_public: bool,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Assigned category.
    pub category_id: Option<Uuid>,
}

/// Favorite toggle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRequest {
    /// New favorite flag.
    pub is_favorite: bool,
}

/// Set or change the media PIN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPinRequest {
    /// Current PIN, required when one is already set.
    pub current_pin: Option<String>,
    /// The new PIN (4-8 digits).
    pub new_pin: String,
    /// Optional hint shown on the gate.
    pub hint: Option<String>,
}

/// Verify a PIN attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPinRequest {
    /// The presented PIN.
    pub pin: String,
}

/// Upload a media file. The payload travels base64-encoded in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadMediaRequest {
    /// Original file name (including extension).
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    /// Image or video.
    pub file_type: MediaKind,
    /// Destination media folder.
    pub media_folder_id: Option<Uuid>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Playback duration in seconds (videos only).
    pub duration: Option<f64>,
    /// Base64-encoded file content.
    pub data: String,
}

/// Bulk recycle-bin request: the selected items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRecycleRequest {
    /// Items to restore or purge.
    pub items: Vec<RecycleSelector>,
}

/// Single-item recycle-bin request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecycleItemRequest {
    /// The selected item.
    #[serde(flatten)]
    pub item: RecycleSelector,
}

/// Import request: the format and the raw document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Format name: `json`, `text`, or `markdown`.
    pub format: String,
    /// The document to import.
    pub content: String,
}

/// Export query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuery {
    /// Format name: `json`, `text`, or `markdown`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}
