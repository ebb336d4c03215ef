//! Popup handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_entity::popup::model::UpdatePopup;
use popuply_service::popup::service::CreatePopupInput;

use crate::dto::request::{CreatePopupRequest, PopupListQuery, UpdatePopupRequest};
use crate::dto::response::{ApiResponse, OkResponse, PopupResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/popups?websiteId=...
pub async fn list_popups(
    State(state): State<AppState>,
    auth: CurrentUser,
    Query(query): Query<PopupListQuery>,
) -> Result<Json<ApiResponse<Vec<PopupResponse>>>, AppError> {
    let popups = state.popup_service.list(&auth, query.website_id).await?;

    Ok(Json(ApiResponse::ok(
        popups.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/popups
pub async fn create_popup(
    State(state): State<AppState>,
    auth: CurrentUser,
    Json(req): Json<CreatePopupRequest>,
) -> Result<Json<ApiResponse<PopupResponse>>, AppError> {
    let website_id = req
        .website_id
        .ok_or_else(|| AppError::validation("websiteId is required"))?;

    let popup = state
        .popup_service
        .create(
            &auth,
            CreatePopupInput {
                website_id,
                name: req.name,
                kind: req.kind,
                trigger: req.trigger,
                status: req.status,
                design_config: req.design_config,
                display_rules: req.display_rules,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(popup.into())))
}

/// GET /api/popups/{id}
pub async fn get_popup(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PopupResponse>>, AppError> {
    let popup = state.popup_service.get(&auth, id).await?;

    Ok(Json(ApiResponse::ok(popup.into())))
}

/// PATCH /api/popups/{id}
pub async fn update_popup(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePopupRequest>,
) -> Result<Json<ApiResponse<PopupResponse>>, AppError> {
    let popup = state
        .popup_service
        .update(
            &auth,
            id,
            UpdatePopup {
                name: req.name,
                kind: req.kind,
                trigger: req.trigger,
                status: req.status,
                design_config: req.design_config,
                display_rules: req.display_rules,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(popup.into())))
}

/// DELETE /api/popups/{id}
pub async fn delete_popup(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OkResponse>>, AppError> {
    state.popup_service.delete(&auth, id).await?;

    Ok(Json(ApiResponse::ok(OkResponse { ok: true })))
}

/// POST /api/popups/{id}/duplicate
pub async fn duplicate_popup(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PopupResponse>>, AppError> {
    let copy = state.popup_service.duplicate(&auth, id).await?;

    Ok(Json(ApiResponse::ok(copy.into())))
}
