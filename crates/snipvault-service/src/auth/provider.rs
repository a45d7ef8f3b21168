//! The authentication provider seam.
//!
//! Identity verification happens outside this system; a provider only has
//! to turn a verified external identity into a local session and resolve
//! presented tokens back to a principal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snipvault_core::error::AppResult;
use snipvault_entity::principal::SessionPrincipal;
use snipvault_entity::user::{Session, User};

/// An identity the external provider has already verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Stable subject identifier from the provider.
    pub subject: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

/// The result of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    /// The bearer token, returned to the client exactly once.
    pub token: String,
    /// The session backing the token.
    pub session: Session,
    /// The signed-in user.
    pub user: User,
}

/// Pluggable authentication backend.
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Establish a local session for a verified external identity.
    async fn sign_in(&self, identity: ExternalIdentity) -> AppResult<IssuedSession>;

    /// Revoke the session behind a signed-in principal.
    async fn sign_out(&self, user_id: Uuid, session_id: Uuid) -> AppResult<()>;

    /// Resolve a presented bearer token to a principal. Invalid, expired,
    /// and revoked tokens resolve to [`SessionPrincipal::Anonymous`].
    async fn resolve(&self, token: &str) -> AppResult<SessionPrincipal>;
}
