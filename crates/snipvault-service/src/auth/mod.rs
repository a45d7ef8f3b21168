//! Authentication: the provider seam and the token-backed default.

pub mod provider;
pub mod service;

pub use provider::{AuthProvider, ExternalIdentity, IssuedSession};
pub use service::TokenAuthProvider;
