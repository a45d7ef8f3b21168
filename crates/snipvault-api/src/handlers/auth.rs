//! Sign-in, sign-out, and current-principal handlers.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use snipvault_core::error::AppError;
use snipvault_entity::principal::SessionPrincipal;
use snipvault_service::auth::ExternalIdentity;

use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, SignInResponse};
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<ApiResponse<SignInResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let issued = state
        .auth
        .sign_in(ExternalIdentity {
            subject: req.subject,
            username: req.username,
            email: req.email,
            display_name: req.display_name,
        })
        .await?;

    Ok(Json(ApiResponse::ok(SignInResponse {
        token: issued.token,
        user: issued.user,
        session_id: issued.session.id,
    })))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<ApiResponse<()>>> {
    let SessionPrincipal::Authenticated { user, session_id } = &principal.principal else {
        return Err(AppError::unauthorized("Not signed in").into());
    };

    state.auth.sign_out(user.id, *session_id).await?;
    // Signing out also locks the media area.
    state.pin_service.end_media_session(user.id).await?;

    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/auth/me
pub async fn me(principal: Principal) -> ApiResult<Json<ApiResponse<SessionPrincipal>>> {
    Ok(Json(ApiResponse::ok(principal.0.principal.clone())))
}
