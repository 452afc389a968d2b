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

use crate::domain::repositories::account_repository::AccountRepository;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 账户仓库
    pub accounts: Arc<dyn AccountRepository>,
}

impl AuthState {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

/// 认证中间件
///
/// 验证 `Authorization: Bearer <key>` 请求头，并把解析出的账户
/// 注入请求扩展
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - 缺失、格式错误、未知或停用的密钥返回 401
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing or malformed API key"))?
        .to_string();

    match state.accounts.find_by_api_key(&token).await {
        Ok(Some(account)) => {
            req.extensions_mut().insert(account);
            Ok(next.run(req).await)
        }
        Ok(None) => {
            warn!("Rejected unknown or inactive API key");
            Err(AppError::unauthorized("Invalid API key"))
        }
        Err(e) => {
            error!("Database error checking API key: {}", e);
            Err(AppError::internal())
        }
    }
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
