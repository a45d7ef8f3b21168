//! The media PIN gate: set/change, verify with lockout, idle session.
//!
//! The gate is a soft UX barrier over the media area, not a security
//! boundary. All window and lockout arithmetic lives on
//! [`SecuritySettings`]; this service loads the record, applies the
//! transition, and persists it wholesale.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use snipvault_core::config::MediaConfig;
use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::SecurityRepository;

use crate::context::RequestContext;

/// Manages the media PIN gate.
#[derive(Debug, Clone)]
pub struct PinService {
    security_repo: Arc<SecurityRepository>,
    config: MediaConfig,
}

/// Gate state reported to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateStatus {
    /// Whether a PIN has been configured.
    pub pin_set: bool,
    /// The owner's hint, if any.
    pub hint: Option<String>,
    /// Whether the gate is currently locked out.
    pub locked: bool,
    /// When the lockout lifts, if locked.
    pub locked_until: Option<DateTime<Utc>>,
    /// Whether a verified media session is currently alive.
    pub session_active: bool,
}

/// Result of a PIN verification attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Whether the PIN matched.
    pub verified: bool,
    /// Failures remaining before lockout (on a miss).
    pub attempts_remaining: Option<u32>,
    /// When the lockout lifts, if this attempt triggered one.
    pub locked_until: Option<DateTime<Utc>>,
}

impl PinService {
    /// Creates a new PIN gate service.
    pub fn new(security_repo: Arc<SecurityRepository>, config: MediaConfig) -> Self {
        Self {
            security_repo,
            config,
        }
    }

    /// Reports the gate state for the owner.
    pub async fn status(&self, ctx: &RequestContext) -> AppResult<GateStatus> {
        let user_id = ctx.require_user()?;
        let settings = self.security_repo.get_or_create(user_id).await?;
        let now = Utc::now();
        Ok(GateStatus {
            pin_set: settings.has_pin(),
            hint: settings.pin_hint.clone(),
            locked: settings.is_locked(now),
            locked_until: settings.lockout_until.filter(|until| now < *until),
            session_active: settings.media_session_alive(now, self.idle_timeout()),
        })
    }

    /// Sets or changes the PIN. Changing requires the current PIN.
    pub async fn set_pin(
        &self,
        ctx: &RequestContext,
        current_pin: Option<&str>,
        new_pin: &str,
        hint: Option<String>,
    ) -> AppResult<()> {
        let user_id = ctx.require_user()?;
        validate_pin(new_pin)?;

        let mut settings = self.security_repo.get_or_create(user_id).await?;
        if settings.has_pin() {
            let presented = current_pin
                .ok_or_else(|| AppError::validation("Current PIN is required to change it"))?;
            if Some(pin_digest(presented)) != settings.pin_digest {
                return Err(AppError::forbidden("Current PIN is incorrect"));
            }
        }

        settings.pin_digest = Some(pin_digest(new_pin));
        settings.pin_hint = hint;
        settings.clear_failures();
        self.security_repo.save(&settings).await?;

        info!(user_id = %user_id, "Media PIN updated");
        Ok(())
    }

    /// Verifies a PIN attempt, enforcing the sliding-window lockout. A
    /// correct PIN opens a media session.
    pub async fn verify(&self, ctx: &RequestContext, pin: &str) -> AppResult<VerifyOutcome> {
        let user_id = ctx.require_user()?;
        let mut settings = self.security_repo.get_or_create(user_id).await?;
        let now = Utc::now();

        if settings.is_locked(now) {
            return Err(AppError::forbidden(
                "Too many failed attempts; the media area is temporarily locked",
            ));
        }
        let Some(expected) = settings.pin_digest.clone() else {
            return Err(AppError::validation("No PIN has been set"));
        };

        if pin_digest(pin) == expected {
            settings.clear_failures();
            settings.media_last_activity_at = Some(now);
            self.security_repo.save(&settings).await?;
            info!(user_id = %user_id, "Media PIN verified");
            return Ok(VerifyOutcome {
                verified: true,
                attempts_remaining: None,
                locked_until: None,
            });
        }

        let locked = settings.register_failure(
            now,
            self.failure_window(),
            self.config.max_failed_attempts,
            self.lockout(),
        );
        let attempt_count = settings.failed_attempts.0.len() as u32;
        self.security_repo.save(&settings).await?;

        warn!(user_id = %user_id, attempt_count, locked, "Media PIN attempt failed");
        Ok(VerifyOutcome {
            verified: false,
            attempts_remaining: Some(
                self.config.max_failed_attempts.saturating_sub(attempt_count),
            ),
            locked_until: settings.lockout_until,
        })
    }

    /// Rejects media access unless a verified session is alive, then
    /// refreshes the idle timer.
    pub async fn require_media_session(&self, ctx: &RequestContext) -> AppResult<()> {
        let user_id = ctx.require_user()?;
        let settings = self.security_repo.get_or_create(user_id).await?;

        // No PIN configured means the gate is open.
        if !settings.has_pin() {
            return Ok(());
        }
        if !settings.media_session_alive(Utc::now(), self.idle_timeout()) {
            return Err(AppError::unauthorized(
                "Media session expired; verify the PIN again",
            ));
        }
        self.security_repo.touch_media_activity(user_id).await
    }

    /// Refreshes the idle timer (the explicit keep-alive endpoint).
    pub async fn ping(&self, ctx: &RequestContext) -> AppResult<()> {
        self.require_media_session(ctx).await
    }

    /// Ends the media session for a user, re-locking the gate.
    pub async fn end_media_session(&self, user_id: Uuid) -> AppResult<()> {
        self.security_repo.clear_media_session(user_id).await
    }

    fn failure_window(&self) -> Duration {
        Duration::minutes(self.config.failure_window_minutes)
    }

    fn lockout(&self) -> Duration {
        Duration::minutes(self.config.lockout_minutes)
    }

    fn idle_timeout(&self) -> Duration {
        Duration::seconds(self.config.idle_timeout_seconds)
    }
}

/// SHA-256 hex digest of a PIN.
fn pin_digest(pin: &str) -> String {
    format!("{:x}", Sha256::digest(pin.as_bytes()))
}

/// PINs are 4 to 8 digits.
fn validate_pin(pin: &str) -> AppResult<()> {
    if pin.len() < 4 || pin.len() > 8 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("PIN must be 4 to 8 digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_format() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("12345678").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("123456789").is_err());
        assert!(validate_pin("12a4").is_err());
    }

    #[test]
    fn test_pin_digest_matches_only_same_pin() {
        assert_eq!(pin_digest("1234"), pin_digest("1234"));
        assert_ne!(pin_digest("1234"), pin_digest("1235"));
        assert_eq!(pin_digest("1234").len(), 64);
    }
}
