//! User and session entities.

pub mod model;

pub use model::{Session, UpsertUser, User};
