//! Shared test helpers for integration tests.
//!
//! `TestApp` builds the full router against a real PostgreSQL database, so
//! these tests are `#[ignore]`d by default and run with
//! `cargo test -- --ignored` once `config/test.toml` points at a reachable
//! test database.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use popuply_core::config::AppConfig;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct fixture queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = popuply_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        popuply_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

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
        let analytics_service =
            Arc::new(popuply_service::analytics::service::AnalyticsService::new(
                Arc::clone(&analytics_repo),
                Arc::clone(&popup_repo),
                Arc::clone(&website_repo),
            ));

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

        let router = popuply_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        for table in ["analytics_events", "popups", "websites", "users"] {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Register a user through the API and return their access token.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "name": "Test User",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );

        response.access_token()
    }

    /// Login and return the JWT access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.access_token()
    }

    /// Promote a registered user to admin directly in the database.
    pub async fn promote_to_admin(&self, email: &str) {
        sqlx::query("UPDATE users SET role = 'admin' WHERE email = $1")
            .bind(email)
            .execute(&self.db_pool)
            .await
            .expect("Failed to promote user");
    }

    /// Read a user's stored token version directly from the database.
    pub async fn stored_token_version(&self, email: &str) -> i32 {
        sqlx::query_scalar("SELECT refresh_token_version FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read token version")
    }

    /// Count rows owned by a user id across a table.
    pub async fn count_owned(&self, table: &str, user_id: Uuid) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1");
        sqlx::query_scalar(&query)
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count rows")
    }

    /// Create a website through the API and return its id and key.
    pub async fn create_website(&self, token: &str, domain: &str) -> (Uuid, String) {
        let response = self
            .request(
                "POST",
                "/api/websites",
                Some(serde_json::json!({ "domain": domain })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Website creation failed: {:?}",
            response.body
        );

        let id = response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No website id in response");
        let key = response.body["data"]["websiteKey"]
            .as_str()
            .expect("No website key in response")
            .to_string();
        (id, key)
    }

    /// Create a popup through the API and return its id.
    pub async fn create_popup(&self, token: &str, website_id: Uuid, name: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/popups",
                Some(serde_json::json!({
                    "websiteId": website_id,
                    "name": name,
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Popup creation failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No popup id in response")
    }

    /// Make an HTTP request against the test router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// Pull the access token out of an auth response body.
    pub fn access_token(&self) -> String {
        self.body["data"]["accessToken"]
            .as_str()
            .expect("No accessToken in response")
            .to_string()
    }

    /// Pull the refresh token out of an auth response body.
    pub fn refresh_token(&self) -> String {
        self.body["data"]["refreshToken"]
            .as_str()
            .expect("No refreshToken in response")
            .to_string()
    }
}
