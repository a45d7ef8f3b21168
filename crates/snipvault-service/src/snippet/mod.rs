//! Snippet business logic.

pub mod service;

pub use service::SnippetService;
