// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::scrape_use_case::ScrapeUseCase;
use crate::domain::repositories::scrape_request_repository::ScrapeRequestRepository;
use crate::presentation::handlers::scrape_handler;
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::queue::completion_queue::CompletionQueue;
use axum::{
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 抓取相关路由挂载在 `api_prefix` 下并要求 API 密钥，
/// 健康检查与版本信息为公开端点
///
/// # 参数
///
/// * `api_prefix` - API 路由前缀，如 `/api/v1`
/// * `use_case` - 抓取请求用例
/// * `auth_state` - 认证状态
pub fn routes<R, Q>(
    api_prefix: &str,
    use_case: Arc<ScrapeUseCase<R, Q>>,
    auth_state: AuthState,
) -> Router
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let protected_routes = Router::new()
        .route(
            "/scrape",
            post(scrape_handler::create_scrape::<R, Q>).get(scrape_handler::list_scrapes::<R, Q>),
        )
        .route(
            "/scrape/{request_id}",
            get(scrape_handler::get_scrape_status::<R, Q>)
                .delete(scrape_handler::cancel_scrape::<R, Q>),
        )
        .route(
            "/scrape/{request_id}/results",
            get(scrape_handler::get_scrape_results::<R, Q>),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(Extension(use_case));

    let app = match api_prefix.trim_end_matches('/') {
        "" => Router::new().merge(public_routes).merge(protected_routes),
        prefix => Router::new()
            .merge(public_routes)
            .nest(prefix, protected_routes),
    };

    app.layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
