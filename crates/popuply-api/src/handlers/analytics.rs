//! Analytics handlers — event ingestion and reporting.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_service::analytics::service::TrackEventInput;

use crate::dto::request::TrackEventRequest;
use crate::dto::response::{ApiResponse, OkResponse, PopupReportResponse, SummaryResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/events
///
/// Public ingestion endpoint used by the embed script. Authenticated by
/// the website key alone.
pub async fn track_event(
    State(state): State<AppState>,
    Json(req): Json<TrackEventRequest>,
) -> Result<Json<ApiResponse<OkResponse>>, AppError> {
    state
        .analytics_service
        .record(TrackEventInput {
            website_key: req.website_key,
            popup_id: req.popup_id,
            event_type: req.event_type,
            visitor_id: req.visitor_id,
            session_id: req.session_id,
            page_url: req.page_url,
            referrer: req.referrer,
            device_type: req.device_type,
            browser: req.browser,
            country: req.country,
            city: req.city,
            metadata: req.metadata,
        })
        .await?;

    Ok(Json(ApiResponse::ok(OkResponse { ok: true })))
}

/// GET /api/popups/{id}/report
pub async fn popup_report(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PopupReportResponse>>, AppError> {
    let report = state.analytics_service.popup_report(&auth, id).await?;

    Ok(Json(ApiResponse::ok(report.into())))
}

/// GET /api/analytics/summary
pub async fn account_summary(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    let summary = state.analytics_service.account_summary(&auth).await?;

    Ok(Json(ApiResponse::ok(summary.into())))
}
