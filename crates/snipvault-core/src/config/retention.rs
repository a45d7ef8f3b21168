//! Recycle-bin retention and worker scheduling configuration.

use serde::{Deserialize, Serialize};

/// Retention policy for soft-deleted rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Whether the background worker runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Days a soft-deleted row stays in the recycle bin before purge.
    #[serde(default = "default_days")]
    pub days: i64,
    /// Cron expression for the retention sweep (6-field, seconds first).
    #[serde(default = "default_purge_cron")]
    pub purge_cron: String,
    /// Cron expression for the expired-session sweep.
    #[serde(default = "default_session_cron")]
    pub session_cron: String,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            days: default_days(),
            purge_cron: default_purge_cron(),
            session_cron: default_session_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_days() -> i64 {
    30
}

fn default_purge_cron() -> String {
    // Daily at 03:00.
    "0 0 3 * * *".to_string()
}

fn default_session_cron() -> String {
    // Every 15 minutes.
    "0 */15 * * * *".to_string()
}
