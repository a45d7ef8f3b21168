//! Per-user security settings backing the media PIN gate.
//!
//! This is a dedicated typed record (one row per user) rather than the
//! free-form metadata bag the gate state used to live in. The lockout
//! window arithmetic is kept as plain methods here so it can be exercised
//! without a database.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One failed PIN attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinAttempt {
    /// When the failed attempt happened.
    pub at: DateTime<Utc>,
}

/// Media security settings for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecuritySettings {
    /// The user these settings belong to.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the PIN (None until a PIN is set).
    #[serde(skip_serializing)]
    pub pin_digest: Option<String>,
    /// Optional user-chosen hint shown on the gate.
    pub pin_hint: Option<String>,
    /// Recent failed attempts, pruned to the sliding window.
    pub failed_attempts: Json<Vec<PinAttempt>>,
    /// Attempts are rejected until this time once the limit is hit.
    pub lockout_until: Option<DateTime<Utc>>,
    /// Last activity inside the media area; drives the idle timeout.
    pub media_last_activity_at: Option<DateTime<Utc>>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl SecuritySettings {
    /// A fresh record for a user with no PIN configured.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            pin_digest: None,
            pin_hint: None,
            failed_attempts: Json(Vec::new()),
            lockout_until: None,
            media_last_activity_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether a PIN has been configured.
    pub fn has_pin(&self) -> bool {
        self.pin_digest.is_some()
    }

    /// Whether the gate is locked out at the given instant.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.lockout_until, Some(until) if now < until)
    }

    /// Drop failed attempts that fell out of the sliding window.
    pub fn prune_attempts(&mut self, now: DateTime<Utc>, window: Duration) {
        let cutoff = now - window;
        self.failed_attempts.0.retain(|a| a.at >= cutoff);
    }

    /// Record one failed attempt.
    ///
    /// Prunes the window first, appends the attempt, and if the count
    /// reaches `max_failures` sets `lockout_until` and returns `true`.
    pub fn register_failure(
        &mut self,
        now: DateTime<Utc>,
        window: Duration,
        max_failures: u32,
        lockout: Duration,
    ) -> bool {
        self.prune_attempts(now, window);
        self.failed_attempts.0.push(PinAttempt { at: now });
        if self.failed_attempts.0.len() >= max_failures as usize {
            self.lockout_until = Some(now + lockout);
            true
        } else {
            false
        }
    }

    /// Clear failure state after a successful verification.
    pub fn clear_failures(&mut self) {
        self.failed_attempts.0.clear();
        self.lockout_until = None;
    }

    /// Whether the media session is still alive at `now` given the idle
    /// timeout. A session never verified is not alive.
    pub fn media_session_alive(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        matches!(self.media_last_activity_at, Some(last) if now - last <= idle_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Duration {
        Duration::minutes(15)
    }

    fn lockout() -> Duration {
        Duration::minutes(30)
    }

    fn settings() -> SecuritySettings {
        SecuritySettings::empty(Uuid::new_v4())
    }

    #[test]
    fn test_five_failures_within_window_lock() {
        let mut s = settings();
        let now = Utc::now();
        for i in 0..4 {
            let locked = s.register_failure(now + Duration::seconds(i), window(), 5, lockout());
            assert!(!locked);
        }
        let locked = s.register_failure(now + Duration::seconds(4), window(), 5, lockout());
        assert!(locked);
        assert!(s.is_locked(now + Duration::seconds(5)));
        assert!(!s.is_locked(now + Duration::minutes(31)));
    }

    #[test]
    fn test_old_failures_fall_out_of_window() {
        let mut s = settings();
        let start = Utc::now();
        for i in 0..4 {
            s.register_failure(start + Duration::seconds(i), window(), 5, lockout());
        }
        // Fifth failure 16 minutes later: earlier four have aged out.
        let locked = s.register_failure(start + Duration::minutes(16), window(), 5, lockout());
        assert!(!locked);
        assert_eq!(s.failed_attempts.0.len(), 1);
    }

    #[test]
    fn test_success_clears_failures_before_fifth() {
        let mut s = settings();
        let now = Utc::now();
        for i in 0..4 {
            s.register_failure(now + Duration::seconds(i), window(), 5, lockout());
        }
        s.clear_failures();
        assert!(s.failed_attempts.0.is_empty());
        assert!(!s.is_locked(now));
        // The counter really restarted: four more failures do not lock.
        for i in 0..4 {
            assert!(!s.register_failure(now + Duration::seconds(10 + i), window(), 5, lockout()));
        }
    }

    #[test]
    fn test_media_session_idle_expiry() {
        let mut s = settings();
        let now = Utc::now();
        assert!(!s.media_session_alive(now, Duration::seconds(300)));
        s.media_last_activity_at = Some(now);
        assert!(s.media_session_alive(now + Duration::seconds(299), Duration::seconds(300)));
        assert!(!s.media_session_alive(now + Duration::seconds(301), Duration::seconds(300)));
    }
}
