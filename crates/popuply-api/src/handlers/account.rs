//! Account handlers — the /auth/me surface.

use axum::Json;
use axum::extract::State;

use popuply_core::error::AppError;
use popuply_entity::user::model::UpdateProfile;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, OkResponse, ProfileResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = state.account_service.get_profile(&auth).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /api/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = state
        .account_service
        .update_profile(
            &auth,
            UpdateProfile {
                name: req.name,
                email: req.email,
                company: req.company,
                preferences: req.preferences.map(Into::into),
            },
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        user.into(),
        "Profile updated successfully",
    )))
}

/// DELETE /api/auth/me
///
/// Destructive and irreversible: cascades to every website and popup the
/// account owns.
pub async fn delete_me(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<OkResponse>>, AppError> {
    state.account_service.delete_account(&auth).await?;

    Ok(Json(ApiResponse::with_message(
        OkResponse { ok: true },
        "Account deleted successfully",
    )))
}
