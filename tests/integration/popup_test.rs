//! Integration tests for popup management.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_popup_with_name_fallback() {
    let app = helpers::TestApp::new().await;
    let token = app.register("maker@example.com", "Passw0rd!").await;
    let (website_id, _) = app.create_website(&token, "maker.example.com").await;

    // No name: falls back to the design config title.
    let from_title = app
        .request(
            "POST",
            "/api/popups",
            Some(serde_json::json!({
                "websiteId": website_id,
                "designConfig": { "title": "Spring Sale", "color": "#fff" },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(from_title.status, StatusCode::OK);
    assert_eq!(from_title.body["data"]["name"], "Spring Sale");
    assert_eq!(from_title.body["data"]["status"], "draft");
    assert_eq!(from_title.body["data"]["type"], "email_capture");
    assert_eq!(from_title.body["data"]["counters"]["views"], 0);

    // No name and no title: placeholder.
    let untitled = app
        .request(
            "POST",
            "/api/popups",
            Some(serde_json::json!({ "websiteId": website_id })),
            Some(&token),
        )
        .await;
    assert_eq!(untitled.body["data"]["name"], "Untitled Popup");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_popup_on_foreign_website_fails() {
    let app = helpers::TestApp::new().await;
    let owner = app.register("owner2@example.com", "Passw0rd!").await;
    let intruder = app.register("intruder@example.com", "Passw0rd!").await;
    let (website_id, _) = app.create_website(&owner, "owned.example.com").await;

    let response = app
        .request(
            "POST",
            "/api/popups",
            Some(serde_json::json!({
                "websiteId": website_id,
                "name": "Hijack",
            })),
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_publish_stamps_published_at_once() {
    let app = helpers::TestApp::new().await;
    let token = app.register("publisher@example.com", "Passw0rd!").await;
    let (website_id, _) = app.create_website(&token, "pub.example.com").await;
    let popup_id = app.create_popup(&token, website_id, "Banner").await;

    let publish = app
        .request(
            "PATCH",
            &format!("/api/popups/{popup_id}"),
            Some(serde_json::json!({ "status": "active" })),
            Some(&token),
        )
        .await;
    assert_eq!(publish.status, StatusCode::OK);
    let stamped = publish.body["data"]["publishedAt"].as_str().unwrap().to_string();

    // Pausing and re-activating keeps the original timestamp.
    app.request(
        "PATCH",
        &format!("/api/popups/{popup_id}"),
        Some(serde_json::json!({ "status": "paused" })),
        Some(&token),
    )
    .await;
    let republished = app
        .request(
            "PATCH",
            &format!("/api/popups/{popup_id}"),
            Some(serde_json::json!({ "status": "active" })),
            Some(&token),
        )
        .await;
    assert_eq!(
        republished.body["data"]["publishedAt"].as_str().unwrap(),
        stamped
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_resets_metrics_and_status() {
    let app = helpers::TestApp::new().await;
    let token = app.register("dupe@example.com", "Passw0rd!").await;
    let (website_id, key) = app.create_website(&token, "dupe.example.com").await;
    let popup_id = app.create_popup(&token, website_id, "Original").await;

    // Activate and give the original some traffic.
    app.request(
        "PATCH",
        &format!("/api/popups/{popup_id}"),
        Some(serde_json::json!({ "status": "active" })),
        Some(&token),
    )
    .await;
    app.request(
        "POST",
        "/api/events",
        Some(serde_json::json!({
            "websiteKey": key,
            "popupId": popup_id,
            "eventType": "view",
        })),
        None,
    )
    .await;

    let duplicate = app
        .request(
            "POST",
            &format!("/api/popups/{popup_id}/duplicate"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::OK);
    assert_eq!(duplicate.body["data"]["name"], "Copy of Original");
    assert_eq!(duplicate.body["data"]["status"], "draft");
    assert_eq!(duplicate.body["data"]["counters"]["views"], 0);
    assert!(duplicate.body["data"]["publishedAt"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_popups_filtered_by_website() {
    let app = helpers::TestApp::new().await;
    let token = app.register("lister@example.com", "Passw0rd!").await;
    let (site_a, _) = app.create_website(&token, "a.example.com").await;
    let (site_b, _) = app.create_website(&token, "b.example.com").await;
    app.create_popup(&token, site_a, "On A").await;
    app.create_popup(&token, site_b, "On B").await;

    let all = app.request("GET", "/api/popups", None, Some(&token)).await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 2);

    let only_a = app
        .request(
            "GET",
            &format!("/api/popups?websiteId={site_a}"),
            None,
            Some(&token),
        )
        .await;
    let names: Vec<&str> = only_a.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["On A"]);

    let nested = app
        .request(
            "GET",
            &format!("/api/websites/{site_b}/popups"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(nested.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(nested.body["data"][0]["name"], "On B");
}
