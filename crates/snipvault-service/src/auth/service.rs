//! Token-backed authentication against the local users/sessions tables.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::{SessionRepository, UserRepository};
use snipvault_entity::principal::SessionPrincipal;
use snipvault_entity::user::UpsertUser;

use crate::auth::provider::{AuthProvider, ExternalIdentity, IssuedSession};

/// The default [`AuthProvider`]: upserts users by external subject and
/// issues random bearer tokens stored as SHA-256 digests.
#[derive(Debug, Clone)]
pub struct TokenAuthProvider {
    user_repo: Arc<UserRepository>,
    session_repo: Arc<SessionRepository>,
    session_ttl: Duration,
}

impl TokenAuthProvider {
    /// Create a provider issuing sessions with the given lifetime.
    pub fn new(
        user_repo: Arc<UserRepository>,
        session_repo: Arc<SessionRepository>,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl: Duration::seconds(session_ttl_seconds as i64),
        }
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn sign_in(&self, identity: ExternalIdentity) -> AppResult<IssuedSession> {
        if identity.subject.trim().is_empty() {
            return Err(AppError::validation("Identity subject cannot be empty"));
        }
        if identity.username.trim().is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }

        let user = self
            .user_repo
            .upsert(&UpsertUser {
                external_subject: identity.subject,
                username: identity.username,
                email: identity.email,
                display_name: identity.display_name,
            })
            .await?;

        let token = generate_token();
        let expires_at = Utc::now() + self.session_ttl;
        let session = self
            .session_repo
            .create(user.id, &token_digest(&token), expires_at)
            .await?;

        info!(user_id = %user.id, session_id = %session.id, "User signed in");

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }

    async fn sign_out(&self, user_id: Uuid, session_id: Uuid) -> AppResult<()> {
        self.session_repo.revoke(session_id, user_id).await?;
        info!(user_id = %user_id, session_id = %session_id, "User signed out");
        Ok(())
    }

    async fn resolve(&self, token: &str) -> AppResult<SessionPrincipal> {
        let Some(session) = self
            .session_repo
            .find_by_token_digest(&token_digest(token))
            .await?
        else {
            return Ok(SessionPrincipal::Anonymous);
        };

        if !session.is_active(Utc::now()) {
            return Ok(SessionPrincipal::Anonymous);
        }

        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            return Ok(SessionPrincipal::Anonymous);
        };

        self.session_repo.touch(session.id).await?;

        Ok(SessionPrincipal::Authenticated {
            user,
            session_id: session.id,
        })
    }
}

/// 256 bits of randomness, URL-safe base64.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 hex digest of a bearer token.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.len() >= 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_digest_is_stable_hex() {
        let d = token_digest("abc");
        assert_eq!(d.len(), 64);
        assert_eq!(d, token_digest("abc"));
        assert_ne!(d, token_digest("abd"));
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
