//! Authentication extractors — the session middleware of the API.
//!
//! `CurrentUser` pulls the bearer token from the `Authorization` header,
//! verifies it, enforces the token-version check against the live user
//! record, and injects the resolved identity. `AdminUser` adds the role
//! check on top.
//!
//! Every failure path rejects with the same 401 so that a missing header,
//! a forged token, a stale version, a deleted account, and a failed admin
//! check are indistinguishable to the caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use popuply_core::error::AppError;
use popuply_service::context::RequestContext;

use crate::state::AppState;

/// Uniform rejection message for every authentication failure.
const UNAUTHENTICATED: &str = "Authentication required";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestContext);

impl std::ops::Deref for CurrentUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extracted admin context. Identical to [`CurrentUser`] plus a role
/// check; non-admins are rejected exactly like unauthenticated callers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        // Signature + expiry + version check, then identity load.
        let identity = state.session_manager.resolve_access(token).await?;

        Ok(CurrentUser(RequestContext::from(identity)))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(ctx) = CurrentUser::from_request_parts(parts, state).await?;

        if !ctx.is_admin() {
            return Err(AppError::authentication(UNAUTHENTICATED));
        }

        Ok(AdminUser(ctx))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::authentication(UNAUTHENTICATED))
}
