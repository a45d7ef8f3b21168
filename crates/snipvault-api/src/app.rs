//! Application builder, wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use snipvault_core::config::{AppConfig, CorsConfig};
use snipvault_core::error::AppError;
use snipvault_database::repositories::{
    CategoryRepository, FolderRepository, MediaFileRepository, MediaFolderRepository,
    SecurityRepository, SessionRepository, SnippetRepository, UserRepository,
};
use snipvault_service::auth::TokenAuthProvider;
use snipvault_service::category::CategoryService;
use snipvault_service::folder::FolderService;
use snipvault_service::media::MediaService;
use snipvault_service::pin::PinService;
use snipvault_service::recycle::RecycleService;
use snipvault_service::snippet::SnippetService;
use snipvault_service::transfer::TransferService;
use snipvault_storage::MediaStorage;
use snipvault_worker::jobs::{RetentionJob, SessionCleanupJob};
use snipvault_worker::CronScheduler;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(build_cors_layer(cors_config))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Constructs the application state: repositories, storage, and services.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let storage = Arc::new(MediaStorage::from_config(&config.storage).await?);

    let snippet_repo = Arc::new(SnippetRepository::new(db_pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(db_pool.clone()));
    let media_file_repo = Arc::new(MediaFileRepository::new(db_pool.clone()));
    let media_folder_repo = Arc::new(MediaFolderRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let security_repo = Arc::new(SecurityRepository::new(db_pool.clone()));

    let auth = Arc::new(TokenAuthProvider::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_repo),
        config.auth.session_ttl_seconds,
    ));

    let snippet_service = Arc::new(SnippetService::new(
        Arc::clone(&snippet_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&category_repo),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&snippet_repo),
    ));
    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&category_repo),
        Arc::clone(&snippet_repo),
    ));
    let media_service = Arc::new(MediaService::new(
        Arc::clone(&media_file_repo),
        Arc::clone(&media_folder_repo),
        Arc::clone(&storage),
    ));
    let pin_service = Arc::new(PinService::new(
        Arc::clone(&security_repo),
        config.media.clone(),
    ));
    let recycle_service = Arc::new(RecycleService::new(
        Arc::clone(&snippet_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&category_repo),
        Arc::clone(&media_file_repo),
        Arc::clone(&media_folder_repo),
        Arc::clone(&folder_service),
        Arc::clone(&category_service),
        Arc::clone(&media_service),
    ));
    let transfer_service = Arc::new(TransferService::new(Arc::clone(&snippet_repo)));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        storage,
        auth,
        snippet_service,
        folder_service,
        category_service,
        media_service,
        pin_service,
        recycle_service,
        transfer_service,
    })
}

/// Runs the SnipVault server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting SnipVault server...");

    let state = build_state(config, db_pool.clone()).await?;
    let config = Arc::clone(&state.config);

    // Background scheduler: retention sweep and session cleanup.
    let scheduler = if config.retention.enabled {
        let retention_job = Arc::new(RetentionJob::new(
            Arc::clone(&state.recycle_service),
            config.retention.clone(),
        ));
        let session_job = Arc::new(SessionCleanupJob::new(
            Arc::new(SessionRepository::new(db_pool.clone())),
            Arc::new(SecurityRepository::new(db_pool.clone())),
            config.media.clone(),
        ));

        let scheduler =
            CronScheduler::new(retention_job, session_job, config.retention.clone()).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Retention worker disabled by configuration");
        None
    };

    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("SnipVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
