//! Website handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use popuply_core::error::AppError;
use popuply_entity::website::model::UpdateWebsite;

use crate::dto::request::{CreateWebsiteRequest, UpdateWebsiteRequest};
use crate::dto::response::{ApiResponse, OkResponse, PopupResponse, WebsiteResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/websites
pub async fn list_websites(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<Vec<WebsiteResponse>>>, AppError> {
    let websites = state.website_service.list(&auth).await?;

    Ok(Json(ApiResponse::ok(
        websites.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/websites
pub async fn create_website(
    State(state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<CreateWebsiteRequest>,
) -> Result<Json<ApiResponse<WebsiteResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let website = state
        .website_service
        .create(&auth, &req.domain, req.name)
        .await?;

    Ok(Json(ApiResponse::ok(website.into())))
}

/// GET /api/websites/{id}
pub async fn get_website(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WebsiteResponse>>, AppError> {
    let website = state.website_service.get(&auth, id).await?;

    Ok(Json(ApiResponse::ok(website.into())))
}

/// PATCH /api/websites/{id}
pub async fn update_website(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWebsiteRequest>,
) -> Result<Json<ApiResponse<WebsiteResponse>>, AppError> {
    let website = state
        .website_service
        .update(
            &auth,
            id,
            UpdateWebsite {
                name: req.name,
                favicon_url: req.favicon_url,
                status: req.status,
                embed_script_enabled: req.embed_script_enabled,
                auto_publish: req.auto_publish,
                site_language: req.language,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(website.into())))
}

/// DELETE /api/websites/{id}
pub async fn delete_website(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OkResponse>>, AppError> {
    state.website_service.delete(&auth, id).await?;

    Ok(Json(ApiResponse::ok(OkResponse { ok: true })))
}

/// POST /api/websites/{id}/rotate-key
pub async fn rotate_key(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WebsiteResponse>>, AppError> {
    let website = state.website_service.rotate_key(&auth, id).await?;

    Ok(Json(ApiResponse::with_message(
        website.into(),
        "Website key rotated",
    )))
}

/// GET /api/websites/{id}/popups
pub async fn list_website_popups(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PopupResponse>>>, AppError> {
    let popups = state.website_service.list_popups(&auth, id).await?;

    Ok(Json(ApiResponse::ok(
        popups.into_iter().map(Into::into).collect(),
    )))
}
