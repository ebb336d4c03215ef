//! Auth handlers — register, login, refresh, change-password.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use popuply_core::error::AppError;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, TokenPairResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .session_manager
        .register(&req.email, &req.password, req.name)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
        user: session.user.into(),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.session_manager.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
        user: session.user.into(),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, AppError> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenPairResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })))
}

/// POST /api/auth/change-password
///
/// Returns a fresh token pair at the new version so the caller stays
/// logged in while every other session dies.
pub async fn change_password(
    State(state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, AppError> {
    let (current, new) = match (&req.current_password, &req.new_password) {
        (Some(current), Some(new)) => (current, new),
        _ => {
            return Err(AppError::validation(
                "Current password and new password are required",
            ));
        }
    };

    let tokens = state
        .session_manager
        .change_password(auth.user_id, current, new)
        .await?;

    Ok(Json(ApiResponse::with_message(
        TokenPairResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
        "Password changed successfully",
    )))
}
