//! Session principal: the tagged union describing who is making a request.
//!
//! Replaces the scattered ambient auth state of the original system
//! (localStorage flags plus provider context) with one explicit value
//! resolved once per request and passed down to services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// Who is acting on the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionPrincipal {
    /// A signed-in user with a valid session token.
    Authenticated {
        /// The resolved user row.
        user: User,
        /// The backing session id.
        session_id: Uuid,
    },
    /// A guest running against a local profile; read-only.
    Guest {
        /// Opaque local profile identifier supplied by the client.
        profile_id: String,
    },
    /// No credentials presented.
    Anonymous,
}

impl SessionPrincipal {
    /// The owner id, if the principal is an authenticated user.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Authenticated { user, .. } => Some(user.id),
            _ => None,
        }
    }
}
