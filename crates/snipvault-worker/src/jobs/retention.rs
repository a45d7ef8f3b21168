//! Recycle-bin retention sweep.

use std::sync::Arc;

use chrono::{Duration, Utc};

use snipvault_core::config::RetentionConfig;
use snipvault_core::error::AppResult;
use snipvault_service::recycle::RecycleService;

/// Permanently purges soft-deleted rows older than the retention window.
#[derive(Debug)]
pub struct RetentionJob {
    /// Recycle-bin service, owns the per-entity purge paths
    recycle: Arc<RecycleService>,
    /// Retention policy
    config: RetentionConfig,
}

impl RetentionJob {
    /// Create a new retention job
    pub fn new(recycle: Arc<RecycleService>, config: RetentionConfig) -> Self {
        Self { recycle, config }
    }

    /// Run one sweep over every soft-deleted table
    pub async fn run(&self) -> AppResult<()> {
        let cutoff = Utc::now() - Duration::days(self.config.days);
        tracing::info!(%cutoff, days = self.config.days, "Running retention sweep");

        let report = self.recycle.purge_expired(cutoff).await?;

        tracing::info!(
            snippets = report.snippets,
            folders = report.folders,
            categories = report.categories,
            media_files = report.media_files,
            media_folders = report.media_folders,
            "Retention sweep complete"
        );
        Ok(())
    }
}
