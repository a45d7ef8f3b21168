//! Security settings repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::security::SecuritySettings;

/// Repository for the per-user media security record.
#[derive(Debug, Clone)]
pub struct SecurityRepository {
    pool: PgPool,
}

impl SecurityRepository {
    /// Create a new security settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the record for a user, creating an empty one on first access.
    pub async fn get_or_create(&self, user_id: Uuid) -> AppResult<SecuritySettings> {
        sqlx::query_as::<_, SecuritySettings>(
            "INSERT INTO security_settings (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load security settings", e)
        })
    }

    /// Write the whole record back. Gate state transitions are computed on
    /// the entity and persisted wholesale.
    pub async fn save(&self, settings: &SecuritySettings) -> AppResult<SecuritySettings> {
        sqlx::query_as::<_, SecuritySettings>(
            "UPDATE security_settings SET \
                pin_digest = $2, pin_hint = $3, failed_attempts = $4, \
                lockout_until = $5, media_last_activity_at = $6, updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(settings.user_id)
        .bind(&settings.pin_digest)
        .bind(&settings.pin_hint)
        .bind(&settings.failed_attempts)
        .bind(settings.lockout_until)
        .bind(settings.media_last_activity_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save security settings", e)
        })?
        .ok_or_else(|| {
            AppError::not_found(format!("Security settings for user {}", settings.user_id))
        })
    }

    /// Refresh the media session activity timestamp without touching the
    /// rest of the record.
    pub async fn touch_media_activity(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE security_settings SET media_last_activity_at = NOW(), updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update media activity", e)
        })?;
        Ok(())
    }

    /// Clear every media session idle since before the cutoff. Returns the
    /// number of sessions expired.
    pub async fn expire_stale_media_sessions(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE security_settings SET media_last_activity_at = NULL, updated_at = NOW() \
             WHERE media_last_activity_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire media sessions", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Clear the media session so the gate re-locks immediately.
    pub async fn clear_media_session(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE security_settings SET media_last_activity_at = NULL, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear media session", e)
        })?;
        Ok(())
    }
}
