//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod category;
pub mod folder;
pub mod health;
pub mod media;
pub mod pin;
pub mod public;
pub mod recycle;
pub mod snippet;
pub mod transfer;
