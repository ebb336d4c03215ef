//! Integration tests for website management.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_and_list_websites() {
    let app = helpers::TestApp::new().await;
    let token = app.register("owner@example.com", "Passw0rd!").await;

    let create = app
        .request(
            "POST",
            "/api/websites",
            Some(serde_json::json!({
                "domain": "https://shop.example.com/",
                "name": "My Shop",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::OK);
    // Scheme and trailing slash are stripped before storage.
    assert_eq!(create.body["data"]["domain"], "shop.example.com");
    assert_eq!(create.body["data"]["status"], "pending");
    assert!(
        create.body["data"]["websiteKey"]
            .as_str()
            .unwrap()
            .starts_with("pk_")
    );
    assert_eq!(create.body["data"]["settings"]["embedScriptEnabled"], true);

    let list = app.request("GET", "/api/websites", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_invalid_domain_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.register("bad@example.com", "Passw0rd!").await;

    for domain in ["", "nodot", "has space.com"] {
        let response = app
            .request(
                "POST",
                "/api/websites",
                Some(serde_json::json!({ "domain": domain })),
                Some(&token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "domain {domain:?} should be rejected"
        );
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_update_website_settings() {
    let app = helpers::TestApp::new().await;
    let token = app.register("settings@example.com", "Passw0rd!").await;
    let (id, _key) = app.create_website(&token, "site.example.com").await;

    let update = app
        .request(
            "PATCH",
            &format!("/api/websites/{id}"),
            Some(serde_json::json!({
                "name": "Renamed",
                "status": "active",
                "autoPublish": true,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["name"], "Renamed");
    assert_eq!(update.body["data"]["status"], "active");
    assert_eq!(update.body["data"]["settings"]["autoPublish"], true);
    // Untouched settings keep their values.
    assert_eq!(update.body["data"]["settings"]["embedScriptEnabled"], true);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_rotate_key_retires_old_key() {
    let app = helpers::TestApp::new().await;
    let token = app.register("rotate@example.com", "Passw0rd!").await;
    let (id, old_key) = app.create_website(&token, "rotate.example.com").await;

    let rotate = app
        .request(
            "POST",
            &format!("/api/websites/{id}/rotate-key"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(rotate.status, StatusCode::OK);
    let new_key = rotate.body["data"]["websiteKey"].as_str().unwrap();
    assert_ne!(new_key, old_key);

    let previous: Vec<String> =
        sqlx::query_scalar::<_, Vec<String>>("SELECT previous_keys FROM websites WHERE id = $1")
            .bind(id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(previous, vec![old_key]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_cross_tenant_access_is_not_found() {
    let app = helpers::TestApp::new().await;
    let owner = app.register("tenant-a@example.com", "Passw0rd!").await;
    let intruder = app.register("tenant-b@example.com", "Passw0rd!").await;
    let (id, _key) = app.create_website(&owner, "private.example.com").await;

    // A foreign website id behaves exactly like a missing one.
    let get = app
        .request("GET", &format!("/api/websites/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(
            "DELETE",
            &format!("/api/websites/{id}"),
            None,
            Some(&intruder),
        )
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // Owner still sees it.
    let still_there = app
        .request("GET", &format!("/api/websites/{id}"), None, Some(&owner))
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_website_removes_its_popups() {
    let app = helpers::TestApp::new().await;
    let token = app.register("cascade@example.com", "Passw0rd!").await;
    let (keep_id, _) = app.create_website(&token, "keep.example.com").await;
    let (drop_id, _) = app.create_website(&token, "drop.example.com").await;
    app.create_popup(&token, keep_id, "Keep me").await;
    app.create_popup(&token, drop_id, "Drop me").await;

    let delete = app
        .request(
            "DELETE",
            &format!("/api/websites/{drop_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);

    let list = app
        .request("GET", "/api/popups", None, Some(&token))
        .await;
    let names: Vec<&str> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Keep me"]);
}
