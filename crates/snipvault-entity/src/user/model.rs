//! User and session entity models.
//!
//! Identity verification is delegated to an external provider; a `User` row
//! mirrors the provider subject so other tables have a stable local owner
//! id, and a `Session` row backs each locally-issued bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user known to SnipVault.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique local user identifier; owner of all user-scoped rows.
    pub id: Uuid,
    /// Stable subject identifier from the external identity provider.
    pub external_subject: String,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When provider-sourced fields last changed.
    pub updated_at: DateTime<Utc>,
}

/// Provider-sourced fields used to create or refresh a user row on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUser {
    /// Stable subject identifier from the identity provider.
    pub external_subject: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

/// A bearer-token session.
///
/// Only the SHA-256 digest of the token is stored; the token itself is
/// returned once at sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The session owner.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the bearer token.
    #[serde(skip_serializing)]
    pub token_digest: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Hard expiry; the session is invalid after this time.
    pub expires_at: DateTime<Utc>,
    /// Last request seen on this session.
    pub last_seen_at: DateTime<Utc>,
    /// Set when the user signed out.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether this session is usable at the given instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_and_revocation() {
        let now = Utc::now();
        let mut session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_digest: "d".into(),
            created_at: now,
            expires_at: now + chrono::Duration::hours(1),
            last_seen_at: now,
            revoked_at: None,
        };
        assert!(session.is_active(now));
        assert!(!session.is_active(now + chrono::Duration::hours(2)));
        session.revoked_at = Some(now);
        assert!(!session.is_active(now));
    }
}
