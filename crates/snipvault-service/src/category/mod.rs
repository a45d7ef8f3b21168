//! Snippet category business logic.

pub mod service;

pub use service::{CategoryService, CreateCategoryRequest, UpdateCategoryRequest};
