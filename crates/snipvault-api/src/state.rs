//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use snipvault_core::config::AppConfig;
use snipvault_service::auth::AuthProvider;
use snipvault_service::category::CategoryService;
use snipvault_service::folder::FolderService;
use snipvault_service::media::MediaService;
use snipvault_service::pin::PinService;
use snipvault_service::recycle::RecycleService;
use snipvault_service::snippet::SnippetService;
use snipvault_service::transfer::TransferService;
use snipvault_storage::MediaStorage;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Media blob storage
    pub storage: Arc<MediaStorage>,

    /// Authentication backend
    pub auth: Arc<dyn AuthProvider>,

    /// Snippet service
    pub snippet_service: Arc<SnippetService>,
    /// Snippet folder service
    pub folder_service: Arc<FolderService>,
    /// Category service
    pub category_service: Arc<CategoryService>,
    /// Media file and folder service
    pub media_service: Arc<MediaService>,
    /// PIN gate service
    pub pin_service: Arc<PinService>,
    /// Recycle bin service
    pub recycle_service: Arc<RecycleService>,
    /// Import/export service
    pub transfer_service: Arc<TransferService>,
}
