//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::user::{UpsertUser, User};

/// Repository for user rows mirrored from the identity provider.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by local id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Create or refresh a user row from provider-sourced fields. Keyed on
    /// the provider subject so repeated sign-ins hit the same row.
    pub async fn upsert(&self, data: &UpsertUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (external_subject, username, email, display_name) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (external_subject) DO UPDATE SET \
                username = EXCLUDED.username, \
                email = EXCLUDED.email, \
                display_name = EXCLUDED.display_name, \
                updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.external_subject)
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert user", e))
    }
}
