//! Media PIN gate handlers.

use axum::extract::State;
use axum::Json;

use snipvault_service::pin::{GateStatus, VerifyOutcome};

use crate::dto::request::{SetPinRequest, VerifyPinRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// GET /api/media/pin/status
pub async fn status(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<GateStatus>>> {
    let status = state.pin_service.status(&principal).await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// POST /api/media/pin
pub async fn set_pin(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<SetPinRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .pin_service
        .set_pin(
            &principal,
            req.current_pin.as_deref(),
            &req.new_pin,
            req.hint,
        )
        .await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/media/pin/verify
pub async fn verify(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<VerifyPinRequest>,
) -> ApiResult<Json<ApiResponse<VerifyOutcome>>> {
    let outcome = state.pin_service.verify(&principal, &req.pin).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/media/session/ping
pub async fn ping(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.pin_service.ping(&principal).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/media/session/end
pub async fn end_session(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<()>>> {
    let user_id = principal.require_user()?;
    state.pin_service.end_media_session(user_id).await?;
    Ok(Json(ApiResponse::ok(())))
}
