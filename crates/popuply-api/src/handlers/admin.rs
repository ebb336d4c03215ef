//! Admin-only handlers.

use axum::Json;
use axum::extract::{Query, State};

use popuply_core::error::AppError;
use popuply_core::types::pagination::PageRequest;

use crate::dto::request::PageQuery;
use crate::dto::response::{ApiResponse, PagedResponse, UserSummaryResponse};
use crate::extractors::AdminUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AdminUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PagedResponse<UserSummaryResponse>>>, AppError> {
    let page = PageRequest::new(query.page, query.per_page);
    let users = state.admin_service.list_users(&page).await?;

    Ok(Json(ApiResponse::ok(PagedResponse {
        page: users.page,
        per_page: users.per_page,
        total: users.total,
        items: users.items.into_iter().map(Into::into).collect(),
    })))
}
