//! Integration tests for analytics ingestion and reporting.

mod helpers;

use http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_events_flow_into_report_and_counters() {
    let app = helpers::TestApp::new().await;
    let token = app.register("stats@example.com", "Passw0rd!").await;
    let (website_id, key) = app.create_website(&token, "stats.example.com").await;
    let popup_id = app.create_popup(&token, website_id, "Tracked").await;

    for event_type in ["view", "view", "view", "click", "conversion", "close"] {
        let response = app
            .request(
                "POST",
                "/api/events",
                Some(serde_json::json!({
                    "websiteKey": key,
                    "popupId": popup_id,
                    "eventType": event_type,
                    "visitorId": "v-1",
                    "pageUrl": "https://stats.example.com/landing",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let report = app
        .request(
            "GET",
            &format!("/api/popups/{popup_id}/report"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["data"]["views"], 3);
    assert_eq!(report.body["data"]["clicks"], 1);
    assert_eq!(report.body["data"]["conversions"], 1);
    assert_eq!(report.body["data"]["closes"], 1);
    let rate = report.body["data"]["conversionRate"].as_f64().unwrap();
    assert!((rate - 1.0 / 3.0).abs() < 1e-9);

    // Counters on the popup and website moved too.
    let popup = app
        .request("GET", &format!("/api/popups/{popup_id}"), None, Some(&token))
        .await;
    assert_eq!(popup.body["data"]["counters"]["views"], 3);
    assert_eq!(popup.body["data"]["counters"]["conversions"], 1);

    let website = app
        .request(
            "GET",
            &format!("/api/websites/{website_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(website.body["data"]["stats"]["totalViews"], 3);
    assert_eq!(website.body["data"]["stats"]["totalConversions"], 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_unknown_key_or_mismatched_popup_records_nothing() {
    let app = helpers::TestApp::new().await;
    let token = app.register("strict@example.com", "Passw0rd!").await;
    let (site_a, _key_a) = app.create_website(&token, "a-strict.example.com").await;
    let (_site_b, key_b) = app.create_website(&token, "b-strict.example.com").await;
    let popup_on_a = app.create_popup(&token, site_a, "On A").await;

    let bad_key = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "websiteKey": "pk_doesnotexist",
                "popupId": popup_on_a,
                "eventType": "view",
            })),
            None,
        )
        .await;
    assert_eq!(bad_key.status, StatusCode::NOT_FOUND);

    // A valid key for a different website must not accept this popup.
    let wrong_site = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "websiteKey": key_b,
                "popupId": popup_on_a,
                "eventType": "view",
            })),
            None,
        )
        .await;
    assert_eq!(wrong_site.status, StatusCode::NOT_FOUND);

    let report = app
        .request(
            "GET",
            &format!("/api/popups/{popup_on_a}/report"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(report.body["data"]["views"], 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_account_summary_aggregates_across_websites() {
    let app = helpers::TestApp::new().await;
    let token = app.register("summary@example.com", "Passw0rd!").await;
    let (site_a, key_a) = app.create_website(&token, "a-sum.example.com").await;
    let (site_b, key_b) = app.create_website(&token, "b-sum.example.com").await;
    let popup_a = app.create_popup(&token, site_a, "A").await;
    let popup_b = app.create_popup(&token, site_b, "B").await;

    // Activate one of the two popups.
    app.request(
        "PATCH",
        &format!("/api/popups/{popup_a}"),
        Some(serde_json::json!({ "status": "active" })),
        Some(&token),
    )
    .await;

    for (key, popup) in [(&key_a, popup_a), (&key_b, popup_b)] {
        app.request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "websiteKey": key,
                "popupId": popup,
                "eventType": "view",
            })),
            None,
        )
        .await;
    }
    app.request(
        "POST",
        "/api/events",
        Some(serde_json::json!({
            "websiteKey": key_a,
            "popupId": popup_a,
            "eventType": "conversion",
        })),
        None,
    )
    .await;

    let summary = app
        .request("GET", "/api/analytics/summary", None, Some(&token))
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["data"]["websites"], 2);
    assert_eq!(summary.body["data"]["popups"], 2);
    assert_eq!(summary.body["data"]["activePopups"], 1);
    assert_eq!(summary.body["data"]["totalViews"], 2);
    assert_eq!(summary.body["data"]["totalConversions"], 1);
}
