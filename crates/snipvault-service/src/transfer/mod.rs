//! Snippet import/export codecs.
//!
//! Three formats, chosen explicitly by the caller: a JSON array (lossless
//! round trip), delimited plain text, and Markdown. The portable record is
//! [`SnippetTransfer`]; ids and timestamps never travel.

pub mod json;
pub mod markdown;
pub mod service;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use snipvault_entity::snippet::Snippet;

pub use service::TransferService;

/// The supported interchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON array of snippet records.
    Json,
    /// Delimited plain text.
    Text,
    /// Markdown with fenced code blocks.
    Markdown,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// The portable snippet record carried by every format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetTransfer {
    /// Snippet title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The source code.
    pub code: String,
    /// Language identifier.
    pub language: String,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Whether the snippet is public.
    #[serde(default)]
    pub is_public: bool,
}

impl From<&Snippet> for SnippetTransfer {
    fn from(snippet: &Snippet) -> Self {
        Self {
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            code: snippet.code.clone(),
            language: snippet.language.clone(),
            tags: snippet.tags.clone(),
            is_public: snippet.is_public,
        }
    }
}
