//! Route definitions for the SnipVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    // Base64 inflates uploads by a third, leave headroom over the raw cap.
    let max_body = (state.config.storage.max_upload_size_bytes as usize / 3) * 4 + 1024;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(snippet_routes())
        .merge(folder_routes())
        .merge(category_routes())
        .merge(media_routes())
        .merge(recycle_routes())
        .merge(public_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: sign-in, sign-out, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
        .route("/auth/me", get(handlers::auth::me))
}

/// Snippet CRUD, favorite, import/export
fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/snippets", get(handlers::snippet::list_snippets))
        .route("/snippets", post(handlers::snippet::create_snippet))
        .route("/snippets/export", get(handlers::transfer::export_snippets))
        .route("/snippets/import", post(handlers::transfer::import_snippets))
        .route("/snippets/{id}", get(handlers::snippet::get_snippet))
        .route("/snippets/{id}", put(handlers::snippet::update_snippet))
        .route("/snippets/{id}", delete(handlers::snippet::delete_snippet))
        .route(
            "/snippets/{id}/favorite",
            put(handlers::snippet::set_favorite),
        )
}

/// Snippet folder CRUD
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::update_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
}

/// Category CRUD (reorder via sort_order update)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::category::list_categories))
        .route("/categories", post(handlers::category::create_category))
        .route("/categories/{id}", get(handlers::category::get_category))
        .route("/categories/{id}", put(handlers::category::update_category))
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
}

/// PIN gate, media session, and PIN-gated media files/folders
fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/media/pin/status", get(handlers::pin::status))
        .route("/media/pin", post(handlers::pin::set_pin))
        .route("/media/pin/verify", post(handlers::pin::verify))
        .route("/media/session/ping", post(handlers::pin::ping))
        .route("/media/session/end", post(handlers::pin::end_session))
        .route(
            "/media/objects/{key}",
            get(handlers::media::download_object),
        )
        .route("/media/files", get(handlers::media::list_files))
        .route("/media/files", post(handlers::media::upload_file))
        .route("/media/files/{id}", get(handlers::media::get_file))
        .route("/media/files/{id}", put(handlers::media::update_file))
        .route("/media/files/{id}", delete(handlers::media::delete_file))
        .route(
            "/media/files/{id}/favorite",
            put(handlers::media::set_file_favorite),
        )
        .route("/media/folders", get(handlers::media::list_folders))
        .route("/media/folders", post(handlers::media::create_folder))
        .route("/media/folders/{id}", put(handlers::media::update_folder))
        .route(
            "/media/folders/{id}",
            delete(handlers::media::delete_folder),
        )
}

/// Recycle bin: contents plus restore/purge, single, bulk, and clear
fn recycle_routes() -> Router<AppState> {
    Router::new()
        .route("/recycle-bin", get(handlers::recycle::contents))
        .route("/recycle-bin/items", get(handlers::recycle::items))
        .route("/recycle-bin/restore", post(handlers::recycle::restore))
        .route("/recycle-bin/purge", post(handlers::recycle::purge))
        .route(
            "/recycle-bin/restore-bulk",
            post(handlers::recycle::restore_bulk),
        )
        .route(
            "/recycle-bin/purge-bulk",
            post(handlers::recycle::purge_bulk),
        )
        .route("/recycle-bin/clear", post(handlers::recycle::clear))
}

/// Unauthenticated public snippet access
fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/public/snippets/{id}",
        get(handlers::public::get_public_snippet),
    )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
