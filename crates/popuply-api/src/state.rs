//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use popuply_auth::session::manager::SessionManager;
use popuply_core::config::AppConfig;
use popuply_service::account::admin::AdminService;
use popuply_service::account::service::AccountService;
use popuply_service::analytics::service::AnalyticsService;
use popuply_service::popup::service::PopupService;
use popuply_service::website::service::WebsiteService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped (or internally pooled) for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Credential and token lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Account self-service.
    pub account_service: Arc<AccountService>,
    /// Admin user management.
    pub admin_service: Arc<AdminService>,
    /// Website management.
    pub website_service: Arc<WebsiteService>,
    /// Popup management.
    pub popup_service: Arc<PopupService>,
    /// Analytics ingestion and reporting.
    pub analytics_service: Arc<AnalyticsService>,
}
