//! Snippet CRUD and favorite handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use snipvault_core::error::AppError;
use snipvault_core::types::pagination::PageResponse;
use snipvault_entity::snippet::{CreateSnippet, Snippet, UpdateSnippet};

use crate::dto::request::{CreateSnippetRequest, FavoriteRequest, SnippetListQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/snippets
pub async fn list_snippets(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<SnippetListQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<Snippet>>>> {
    let (filter, sort_by, sort_dir, page) = query.into_parts();
    let snippets = state
        .snippet_service
        .list(&principal, &filter, sort_by, sort_dir, &page)
        .await?;
    Ok(Json(ApiResponse::ok(snippets)))
}

/// GET /api/snippets/{id}
pub async fn get_snippet(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let snippet = state.snippet_service.get(&principal, id).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// POST /api/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateSnippetRequest>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let owner_id = principal.require_user()?;

    let snippet = state
        .snippet_service
        .create(
            &principal,
            CreateSnippet {
                owner_id,
                title: req.title,
                description: req.description,
                code: req.code,
                language: req.language,
                tags: req.tags,
                is_public: req.is_public,
                folder_id: req.folder_id,
                category_id: req.category_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(snippet)))
}

/// PUT /api/snippets/{id}
pub async fn update_snippet(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSnippet>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let snippet = state.snippet_service.update(&principal, id, req).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// PUT /api/snippets/{id}/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<FavoriteRequest>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let snippet = state
        .snippet_service
        .set_favorite(&principal, id, req.is_favorite)
        .await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// DELETE /api/snippets/{id}
pub async fn delete_snippet(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.snippet_service.soft_delete(&principal, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
