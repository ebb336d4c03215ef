//! Integration tests for registration, login, and token verification.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_register_and_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "password": "Passw0rd!",
                "name": "Alice Example",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["accessToken"].is_string());
    assert!(response.body["data"]["refreshToken"].is_string());
    assert_eq!(response.body["data"]["user"]["email"], "alice@example.com");

    // A freshly registered user starts at token version 0.
    assert_eq!(app.stored_token_version("alice@example.com").await, 0);

    let token = app.login("alice@example.com", "Passw0rd!").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"], "alice@example.com");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register("dup@example.com", "Passw0rd!").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "dup@example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new().await;
    app.register("bob@example.com", "Passw0rd!").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "WrongPass1!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_login_unknown_email_is_indistinguishable() {
    let app = helpers::TestApp::new().await;
    app.register("carol@example.com", "Passw0rd!").await;

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "carol@example.com",
                "password": "WrongPass1!",
            })),
            None,
        )
        .await;

    // Unknown email and wrong password must produce identical failures.
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_me_unauthenticated() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-real-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_refresh_token_flow() {
    let app = helpers::TestApp::new().await;

    let register = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "dave@example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;
    let refresh_token = register.refresh_token();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_access = response.access_token();

    let me = app
        .request("GET", "/api/auth/me", None, Some(&new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);

    // An access token is not accepted where a refresh token is expected.
    let swapped = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": new_access })),
            None,
        )
        .await;
    assert_eq!(swapped.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_admin_listing_requires_admin_role() {
    let app = helpers::TestApp::new().await;
    let token = app.register("plain@example.com", "Passw0rd!").await;

    // A regular user is rejected exactly like an unauthenticated caller.
    let denied = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    app.promote_to_admin("plain@example.com").await;
    let allowed = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert!(allowed.body["data"]["items"].is_array());
}
