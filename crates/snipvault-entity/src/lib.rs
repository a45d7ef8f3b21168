//! Domain entity models and enums for SnipVault.
//!
//! Every table row type lives here as a `sqlx::FromRow` struct, together
//! with the tagged unions that replace the original system's ad-hoc
//! discriminators: [`recycle::RecycleBinItem`] for the recycle bin and
//! [`principal::SessionPrincipal`] for the auth context.

pub mod category;
pub mod folder;
pub mod media;
pub mod principal;
pub mod recycle;
pub mod security;
pub mod snippet;
pub mod user;
