//! Snippet folder CRUD handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use snipvault_entity::folder::Folder;
use snipvault_service::folder::{CreateFolderRequest, UpdateFolderRequest};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let folders = state.folder_service.list(&principal).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.get(&principal, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.create(&principal, req).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.update(&principal, id, req).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.folder_service.soft_delete(&principal, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
