//! Expired-session cleanup: auth sessions and stale media sessions.

use std::sync::Arc;

use chrono::{Duration, Utc};

use snipvault_core::config::MediaConfig;
use snipvault_core::error::AppResult;
use snipvault_database::repositories::{SecurityRepository, SessionRepository};

/// Removes expired and revoked auth sessions and re-locks media gates
/// whose sessions went idle past the timeout.
#[derive(Debug)]
pub struct SessionCleanupJob {
    session_repo: Arc<SessionRepository>,
    security_repo: Arc<SecurityRepository>,
    media_config: MediaConfig,
}

impl SessionCleanupJob {
    /// Create a new session cleanup job
    pub fn new(
        session_repo: Arc<SessionRepository>,
        security_repo: Arc<SecurityRepository>,
        media_config: MediaConfig,
    ) -> Self {
        Self {
            session_repo,
            security_repo,
            media_config,
        }
    }

    /// Run one sweep over both session tables
    pub async fn run(&self) -> AppResult<()> {
        let now = Utc::now();

        let sessions = self.session_repo.cleanup_expired(now).await?;

        let idle_cutoff = now - Duration::seconds(self.media_config.idle_timeout_seconds);
        let media_sessions = self
            .security_repo
            .expire_stale_media_sessions(idle_cutoff)
            .await?;

        if sessions > 0 || media_sessions > 0 {
            tracing::info!(
                expired_sessions = sessions,
                expired_media_sessions = media_sessions,
                "Session cleanup complete"
            );
        } else {
            tracing::debug!("No expired sessions to clean up");
        }
        Ok(())
    }
}
