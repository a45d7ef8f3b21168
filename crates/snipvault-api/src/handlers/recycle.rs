//! Recycle bin handlers.

use axum::extract::State;
use axum::Json;

use snipvault_entity::recycle::{RecycleBinContents, RecycleBinItem};
use snipvault_service::recycle::BulkOutcome;

use crate::dto::request::{BulkRecycleRequest, RecycleItemRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/recycle-bin
pub async fn contents(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<RecycleBinContents>>> {
    let contents = state.recycle_service.contents(&principal).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/recycle-bin/items
///
/// The same bin as one flat tagged list, newest deletion first. Clients
/// that render a single timeline use this instead of the grouped view.
pub async fn items(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<Vec<RecycleBinItem>>>> {
    let contents = state.recycle_service.contents(&principal).await?;
    Ok(Json(ApiResponse::ok(contents.items())))
}

/// POST /api/recycle-bin/restore
pub async fn restore(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<RecycleItemRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.recycle_service.restore(&principal, req.item).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/recycle-bin/purge
pub async fn purge(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<RecycleItemRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.recycle_service.purge(&principal, req.item).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/recycle-bin/restore-bulk
pub async fn restore_bulk(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<BulkRecycleRequest>,
) -> ApiResult<Json<ApiResponse<BulkOutcome>>> {
    let outcome = state
        .recycle_service
        .restore_bulk(&principal, req.items)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/recycle-bin/purge-bulk
pub async fn purge_bulk(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<BulkRecycleRequest>,
) -> ApiResult<Json<ApiResponse<BulkOutcome>>> {
    let outcome = state
        .recycle_service
        .purge_bulk(&principal, req.items)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/recycle-bin/clear
pub async fn clear(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<BulkOutcome>>> {
    let outcome = state.recycle_service.clear(&principal).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
