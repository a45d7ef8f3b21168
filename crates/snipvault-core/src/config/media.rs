//! Media PIN gate and idle-session configuration.

use serde::{Deserialize, Serialize};

/// Settings for the media-area PIN gate.
///
/// The gate is a soft UX barrier, not a security boundary; these values only
/// tune how forgiving it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Failed attempts allowed inside the sliding window before lockout.
    #[serde(default = "default_max_failures")]
    pub max_failed_attempts: u32,
    /// Sliding window over which failures are counted, in minutes.
    #[serde(default = "default_failure_window")]
    pub failure_window_minutes: i64,
    /// Lockout duration once the failure limit is hit, in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_minutes: i64,
    /// Idle time after which a verified media session expires, in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: i64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: default_max_failures(),
            failure_window_minutes: default_failure_window(),
            lockout_minutes: default_lockout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

fn default_max_failures() -> u32 {
    5
}

fn default_failure_window() -> i64 {
    15
}

fn default_lockout() -> i64 {
    30
}

fn default_idle_timeout() -> i64 {
    300
}
