//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snipvault_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// The bearer token, returned exactly once.
    pub token: String,
    /// The signed-in user.
    pub user: User,
    /// The session id backing the token.
    pub session_id: Uuid,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Exported document wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// The chosen format.
    pub format: String,
    /// The rendered document.
    pub content: String,
}
