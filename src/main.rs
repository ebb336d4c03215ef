//! Popuply server — popup dashboard backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use popuply_core::config::AppConfig;
use popuply_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("POPUPLY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Popuply v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = popuply_database::connection::create_pool(&config.database).await?;
    popuply_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(popuply_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let website_repo = Arc::new(
        popuply_database::repositories::website::WebsiteRepository::new(db_pool.clone()),
    );
    let popup_repo = Arc::new(popuply_database::repositories::popup::PopupRepository::new(
        db_pool.clone(),
    ));
    let analytics_repo = Arc::new(
        popuply_database::repositories::analytics::AnalyticsRepository::new(db_pool.clone()),
    );

    // ── Step 3: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(popuply_auth::password::hasher::PasswordHasher::new());
    let password_policy = Arc::new(popuply_auth::password::policy::PasswordPolicy::new(
        &config.auth,
    ));
    let jwt_encoder = Arc::new(popuply_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(popuply_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let session_manager = Arc::new(popuply_auth::session::manager::SessionManager::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));

    // ── Step 4: Services ─────────────────────────────────────────
    let account_service = Arc::new(popuply_service::account::service::AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&website_repo),
        Arc::clone(&popup_repo),
    ));
    let admin_service = Arc::new(popuply_service::account::admin::AdminService::new(
        Arc::clone(&user_repo),
    ));
    let website_service = Arc::new(popuply_service::website::service::WebsiteService::new(
        Arc::clone(&website_repo),
        Arc::clone(&popup_repo),
    ));
    let popup_service = Arc::new(popuply_service::popup::service::PopupService::new(
        Arc::clone(&popup_repo),
        Arc::clone(&website_repo),
    ));
    let analytics_service = Arc::new(popuply_service::analytics::service::AnalyticsService::new(
        Arc::clone(&analytics_repo),
        Arc::clone(&popup_repo),
        Arc::clone(&website_repo),
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = popuply_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        session_manager,
        account_service,
        admin_service,
        website_service,
        popup_service,
        analytics_service,
    };

    let app = popuply_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Popuply server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("Popuply server shut down gracefully");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
