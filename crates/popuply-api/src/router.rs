//! Route definitions for the Popuply HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(website_routes())
        .merge(popup_routes())
        .merge(analytics_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth and account endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
        .route("/auth/me", get(handlers::account::me))
        .route("/auth/me", patch(handlers::account::update_me))
        .route("/auth/me", delete(handlers::account::delete_me))
}

/// Website CRUD and key rotation.
fn website_routes() -> Router<AppState> {
    Router::new()
        .route("/websites", get(handlers::website::list_websites))
        .route("/websites", post(handlers::website::create_website))
        .route("/websites/{id}", get(handlers::website::get_website))
        .route("/websites/{id}", patch(handlers::website::update_website))
        .route("/websites/{id}", delete(handlers::website::delete_website))
        .route(
            "/websites/{id}/rotate-key",
            post(handlers::website::rotate_key),
        )
        .route(
            "/websites/{id}/popups",
            get(handlers::website::list_website_popups),
        )
}

/// Popup CRUD, duplication, and reporting.
fn popup_routes() -> Router<AppState> {
    Router::new()
        .route("/popups", get(handlers::popup::list_popups))
        .route("/popups", post(handlers::popup::create_popup))
        .route("/popups/{id}", get(handlers::popup::get_popup))
        .route("/popups/{id}", patch(handlers::popup::update_popup))
        .route("/popups/{id}", delete(handlers::popup::delete_popup))
        .route(
            "/popups/{id}/duplicate",
            post(handlers::popup::duplicate_popup),
        )
        .route(
            "/popups/{id}/report",
            get(handlers::analytics::popup_report),
        )
}

/// Analytics ingestion and summaries.
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(handlers::analytics::track_event))
        .route(
            "/analytics/summary",
            get(handlers::analytics::account_summary),
        )
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/users", get(handlers::admin::list_users))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
