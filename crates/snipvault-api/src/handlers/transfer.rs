//! Snippet import/export handlers.

use axum::extract::{Query, State};
use axum::Json;

use snipvault_core::error::AppError;
use snipvault_entity::snippet::Snippet;
use snipvault_service::transfer::ExportFormat;

use crate::dto::request::{ExportQuery, ImportRequest};
use crate::dto::response::{ApiResponse, ExportResponse};
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

fn parse_format(name: &str) -> Result<ExportFormat, AppError> {
    name.parse::<ExportFormat>().map_err(AppError::validation)
}

/// GET /api/snippets/export?format=json|text|markdown
pub async fn export_snippets(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Json<ApiResponse<ExportResponse>>> {
    let format = parse_format(&query.format)?;
    let content = state.transfer_service.export(&principal, format).await?;
    Ok(Json(ApiResponse::ok(ExportResponse {
        format: format.to_string(),
        content,
    })))
}

/// POST /api/snippets/import
pub async fn import_snippets(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ImportRequest>,
) -> ApiResult<Json<ApiResponse<Vec<Snippet>>>> {
    let format = parse_format(&req.format)?;
    let imported = state
        .transfer_service
        .import(&principal, format, &req.content)
        .await?;
    Ok(Json(ApiResponse::ok(imported)))
}
