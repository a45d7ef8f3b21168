//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use snipvault_core::config::RetentionConfig;
use snipvault_core::error::AppError;

use crate::jobs::{RetentionJob, SessionCleanupJob};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Retention sweep job
    retention: Arc<RetentionJob>,
    /// Session cleanup job
    session_cleanup: Arc<SessionCleanupJob>,
    /// Retention policy, carries the cron expressions
    config: RetentionConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(
        retention: Arc<RetentionJob>,
        session_cleanup: Arc<SessionCleanupJob>,
        config: RetentionConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            retention,
            session_cleanup,
            config,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_retention_sweep().await?;
        self.register_session_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Retention sweep, daily by default
    async fn register_retention_sweep(&self) -> Result<(), AppError> {
        let retention = Arc::clone(&self.retention);
        let job = CronJob::new_async(self.config.purge_cron.as_str(), move |_uuid, _lock| {
            let retention = Arc::clone(&retention);
            Box::pin(async move {
                if let Err(e) = retention.run().await {
                    tracing::error!("Retention sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create retention schedule: {}", e))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add retention job: {}", e)))?;

        tracing::info!(cron = %self.config.purge_cron, "Registered retention sweep");
        Ok(())
    }

    /// Session cleanup, every 15 minutes by default
    async fn register_session_cleanup(&self) -> Result<(), AppError> {
        let cleanup = Arc::clone(&self.session_cleanup);
        let job = CronJob::new_async(self.config.session_cron.as_str(), move |_uuid, _lock| {
            let cleanup = Arc::clone(&cleanup);
            Box::pin(async move {
                if let Err(e) = cleanup.run().await {
                    tracing::error!("Session cleanup failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create session_cleanup schedule: {}", e))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add session_cleanup job: {}", e)))?;

        tracing::info!(cron = %self.config.session_cron, "Registered session cleanup");
        Ok(())
    }
}
