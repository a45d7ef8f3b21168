//! Request context carrying the resolved principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_entity::principal::SessionPrincipal;

/// Context for the current request.
///
/// Built by the API layer from the resolved [`SessionPrincipal`] and passed
/// into service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Who is making the request.
    pub principal: SessionPrincipal,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for the given principal.
    pub fn new(principal: SessionPrincipal) -> Self {
        Self {
            principal,
            request_time: Utc::now(),
        }
    }

    /// The owner id for owner-scoped operations. Guests and anonymous
    /// callers have no owner scope.
    pub fn require_user(&self) -> AppResult<Uuid> {
        self.principal
            .user_id()
            .ok_or_else(|| AppError::unauthorized("This operation requires a signed-in user"))
    }
}
