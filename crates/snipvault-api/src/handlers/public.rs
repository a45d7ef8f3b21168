//! Unauthenticated public snippet access.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use snipvault_entity::snippet::Snippet;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/public/snippets/{id}
///
/// No principal required: any caller may fetch a snippet its owner marked
/// public.
pub async fn get_public_snippet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let snippet = state.snippet_service.get_public(id).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}
