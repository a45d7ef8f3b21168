//! Category CRUD handlers. Reorder happens through `sort_order` updates.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use snipvault_entity::category::Category;
use snipvault_service::category::{CreateCategoryRequest, UpdateCategoryRequest};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.category_service.list(&principal).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state.category_service.get(&principal, id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state.category_service.create(&principal, req).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state.category_service.update(&principal, id, req).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.category_service.soft_delete(&principal, id).await?;
    Ok(Json(ApiResponse::ok(())))
}
