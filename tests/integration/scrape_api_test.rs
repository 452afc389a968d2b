// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, TestApp};
use axum::http::StatusCode;
use dataflow::domain::repositories::scrape_request_repository::ScrapeRequestRepository;
use serde_json::{json, Value};
use std::collections::HashSet;

async fn submit(app: &TestApp, key: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .server
        .post("/api/v1/scrape")
        .authorization_bearer(key)
        .json(&body)
        .await;
    (response.status_code(), response.json::<Value>())
}

async fn submit_ok(app: &TestApp, url: &str) -> String {
    let (status, body) = submit(
        app,
        &app.starter_key,
        json!({"url": url, "platform": "amazon", "fields": ["price", "title"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["request_id"].as_str().unwrap().to_string()
}

async fn history_total(app: &TestApp, key: &str) -> u64 {
    let response = app
        .server
        .get("/api/v1/scrape")
        .authorization_bearer(key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["total"].as_u64().unwrap()
}

async fn history_page(app: &TestApp, limit: u64, offset: u64) -> Value {
    let response = app
        .server
        .get(&format!("/api/v1/scrape?limit={}&offset={}", limit, offset))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()
}

#[tokio::test]
async fn test_submit_then_complete_then_fetch_results() {
    let app = create_test_app().await;

    let (status, body) = submit(
        &app,
        &app.starter_key,
        json!({"url": "https://example.com/p/1", "platform": "Amazon"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "processing");
    assert_eq!(body["estimated_time"], "30s");
    let request_id = body["request_id"].as_str().unwrap().to_string();
    assert!(request_id.starts_with("req_"));
    assert_eq!(app.queue.len(), 1);

    let response = app
        .server
        .get(&format!("/api/v1/scrape/{}/results", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.contains("processing"));

    app.run_completions().await;

    let response = app
        .server
        .get(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let status_body = response.json::<Value>();
    assert_eq!(status_body["status"], "completed");
    assert_eq!(status_body["record_count"], 1);
    assert!(status_body["error_message"].is_null());
    assert_eq!(status_body["data"]["url"], "https://example.com/p/1");

    let response = app
        .server
        .get(&format!("/api/v1/scrape/{}/results", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let results = response.json::<Value>();
    assert_eq!(results["request_id"], request_id.as_str());
    assert_eq!(results["record_count"], 1);
    assert_eq!(results["data"]["scraped"], true);
    assert_eq!(
        results["data"]["data"]["sample"],
        "Scraped data would appear here"
    );
}

#[tokio::test]
async fn test_free_plan_is_forbidden() {
    let app = create_test_app().await;

    let (status, body) = submit(
        &app,
        &app.free_key,
        json!({"url": "https://example.com/p/1", "platform": "amazon"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Custom scraping is not available on the free plan"
    );
    assert_eq!(history_total(&app, &app.free_key).await, 0);
    assert_eq!(app.queue.len(), 0);
}

#[tokio::test]
async fn test_unsupported_platform_is_rejected() {
    let app = create_test_app().await;

    let (status, body) = submit(
        &app,
        &app.starter_key,
        json!({"url": "https://example.com/p/1", "platform": "bestbuy"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid platform. Supported: amazon, shopify, ebay, walmart, etsy"
    );
    assert_eq!(history_total(&app, &app.starter_key).await, 0);
}

#[tokio::test]
async fn test_invalid_url_and_webhook_are_rejected() {
    let app = create_test_app().await;

    let (status, _) = submit(
        &app,
        &app.starter_key,
        json!({"url": "nope", "platform": "etsy"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = submit(
        &app,
        &app.starter_key,
        json!({"url": "https://example.com", "platform": "etsy", "webhook": "nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(history_total(&app, &app.starter_key).await, 0);
}

#[tokio::test]
async fn test_cancel_processing_request() {
    let app = create_test_app().await;
    let request_id = submit_ok(&app, "https://example.com/p/2").await;

    let response = app
        .server
        .delete(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Scraping request cancelled");
    assert_eq!(body["request_id"], request_id.as_str());
    assert_eq!(body["status"], "failed");

    // The completion that was already queued must not overwrite the cancel.
    app.run_completions().await;

    let response = app
        .server
        .get(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error_message"], "Cancelled by user");
    assert!(body["data"].is_null());

    let stored = app
        .scrape_repo
        .find_by_request_id(&request_id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.completed_at.is_some());
}

#[tokio::test]
async fn test_cancel_completed_request_is_rejected() {
    let app = create_test_app().await;
    let request_id = submit_ok(&app, "https://example.com/p/3").await;
    app.run_completions().await;

    let response = app
        .server
        .delete(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.contains("Only pending or processing requests can be cancelled"));

    let response = app
        .server
        .get(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.starter_key)
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["record_count"], 1);
}

#[tokio::test]
async fn test_other_owner_gets_not_found() {
    let app = create_test_app().await;
    let request_id = submit_ok(&app, "https://example.com/p/4").await;

    for path in [
        format!("/api/v1/scrape/{}", request_id),
        format!("/api/v1/scrape/{}/results", request_id),
    ] {
        let response = app
            .server
            .get(&path)
            .authorization_bearer(&app.other_key)
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>()["error"],
            "Scraping request not found"
        );
    }

    let response = app
        .server
        .delete(&format!("/api/v1/scrape/{}", request_id))
        .authorization_bearer(&app.other_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    assert_eq!(history_total(&app, &app.other_key).await, 0);

    let response = app
        .server
        .get("/api/v1/scrape/req_unknown")
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_pagination() {
    let app = create_test_app().await;
    for i in 0..25 {
        submit_ok(&app, &format!("https://example.com/p/{}", i)).await;
    }

    let all = history_page(&app, 100, 0).await;
    let first = history_page(&app, 20, 0).await;
    let second = history_page(&app, 20, 20).await;

    assert_eq!(all["total"], 25);
    assert_eq!(first["total"], 25);
    assert_eq!(second["total"], 25);

    let ids = |body: &Value| -> Vec<String> {
        body["requests"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["request_id"].as_str().unwrap().to_string())
            .collect()
    };

    let first_ids = ids(&first);
    let second_ids = ids(&second);
    assert_eq!(first_ids.len(), 20);
    assert_eq!(second_ids.len(), 5);

    let first_set: HashSet<_> = first_ids.iter().collect();
    assert!(second_ids.iter().all(|id| !first_set.contains(id)));

    let union: Vec<String> = first_ids.into_iter().chain(second_ids).collect();
    assert_eq!(union, ids(&all));

    let item = &all["requests"][0];
    assert_eq!(item["platform"], "amazon");
    assert_eq!(item["status"], "processing");
    assert_eq!(item["result_count"], 0);
    assert!(item["created_at"].is_string());
    assert!(item["completed_at"].is_null());
}

#[tokio::test]
async fn test_history_rejects_out_of_range_limit() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/v1/scrape?limit=101")
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .get("/api/v1/scrape?offset=-1")
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_zero_limit_returns_empty_page_with_total() {
    let app = create_test_app().await;

    for i in 0..3 {
        submit_ok(&app, &format!("https://example.com/p/{}", i)).await;
    }

    let response = app
        .server
        .get("/api/v1/scrape?limit=0")
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["requests"], json!([]));
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_history_rejects_offset_beyond_database_range() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/v1/scrape?limit=20&offset=18446744073709551615")
        .authorization_bearer(&app.starter_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("offset"));
}
