// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_request::{ScrapeRequest, ScrapeStatus};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 抓取状态响应
///
/// 提交接口和状态查询接口共用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeStatusResponse {
    pub request_id: String,
    pub status: ScrapeStatus,
    pub data: Option<Value>,
    pub record_count: i32,
    pub error_message: Option<String>,
    /// 仅在提交时返回
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estimated_time: Option<String>,
}

impl From<&ScrapeRequest> for ScrapeStatusResponse {
    fn from(request: &ScrapeRequest) -> Self {
        Self {
            request_id: request.request_id.clone(),
            status: request.status,
            data: request.result_data.clone(),
            record_count: request.result_count,
            error_message: request.error_message.clone(),
            estimated_time: None,
        }
    }
}

/// 抓取结果响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResultsResponse {
    pub request_id: String,
    pub data: Option<Value>,
    pub record_count: i32,
}

/// 抓取历史条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeHistoryItem {
    pub request_id: String,
    pub url: String,
    pub platform: String,
    pub status: ScrapeStatus,
    pub result_count: i32,
    pub created_at: DateTime<FixedOffset>,
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl From<&ScrapeRequest> for ScrapeHistoryItem {
    fn from(request: &ScrapeRequest) -> Self {
        Self {
            request_id: request.request_id.clone(),
            url: request.url.clone(),
            platform: request.platform.to_string(),
            status: request.status,
            result_count: request.result_count,
            created_at: request.created_at,
            completed_at: request.completed_at,
        }
    }
}

/// 抓取历史响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeHistoryResponse {
    pub requests: Vec<ScrapeHistoryItem>,
    /// 与分页窗口无关的总数
    pub total: u64,
}

/// 取消响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelScrapeResponse {
    pub message: String,
    pub request_id: String,
    pub status: ScrapeStatus,
}
