//! Snippet entity.

pub mod model;

pub use model::{CreateSnippet, Snippet, SnippetFilter, SnippetSortKey, UpdateSnippet};
