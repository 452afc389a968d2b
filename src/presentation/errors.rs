// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::scrape_use_case::ScrapeUseCaseError;

/// 应用错误类型
///
/// 统一的HTTP错误响应，响应体为 `{"error": <message>}`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<ScrapeUseCaseError> for AppError {
    fn from(err: ScrapeUseCaseError) -> Self {
        match err {
            ScrapeUseCaseError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ScrapeUseCaseError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            ScrapeUseCaseError::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ScrapeUseCaseError::InvalidState(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ScrapeUseCaseError::Repository(_) | ScrapeUseCaseError::Queue(_) => {
                // Details stay in the logs.
                error!("Scrape request failed: {}", err);
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}
