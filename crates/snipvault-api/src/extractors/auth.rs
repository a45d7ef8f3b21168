//! `Principal` extractor, resolves the bearer token (or guest header)
//! into a `RequestContext` for handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use snipvault_entity::principal::SessionPrincipal;
use snipvault_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying an opaque guest profile id for read-only access.
pub const GUEST_PROFILE_HEADER: &str = "x-guest-profile";

/// Extracted request context available in handlers.
///
/// Resolution never rejects on its own: missing or invalid credentials
/// yield an anonymous context, and owner-scoped services refuse it with
/// 401 where a user is required.
#[derive(Debug, Clone)]
pub struct Principal(pub RequestContext);

impl std::ops::Deref for Principal {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(parts) {
            let principal = state.auth.resolve(token).await?;
            return Ok(Principal(RequestContext::new(principal)));
        }

        if state.config.auth.allow_guest {
            if let Some(profile_id) = header_str(parts, GUEST_PROFILE_HEADER) {
                return Ok(Principal(RequestContext::new(SessionPrincipal::Guest {
                    profile_id: profile_id.to_string(),
                })));
            }
        }

        Ok(Principal(RequestContext::new(SessionPrincipal::Anonymous)))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    header_str(parts, "authorization")?.strip_prefix("Bearer ")
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
