// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};

/// 健康检查测试
///
/// 健康检查与版本端点不需要认证
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "healthy"}));

    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 未授权抓取端点测试
///
/// 缺失或无效的API密钥返回401
#[tokio::test]
async fn scrape_endpoint_returns_401_without_auth() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/v1/scrape")
        .json(&json!({"url": "https://example.com", "platform": "amazon"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.json::<Value>()["error"].is_string());

    let response = app
        .server
        .get("/api/v1/scrape")
        .authorization_bearer("not-a-real-key")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
