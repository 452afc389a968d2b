// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::utils::request_id::generate_request_id;

/// 用户取消时写入的错误信息
pub const CANCELLED_BY_USER: &str = "Cancelled by user";

/// 处理超时或遗留过期时写入的错误信息
pub const PROCESSING_TIMED_OUT: &str = "Processing timed out";

/// 抓取请求实体
///
/// 表示用户提交的一次自定义URL抓取请求。请求在创建时即进入
/// Processing 状态，之后由完成工作器、用户取消或超时清理
/// 恰好执行一次终态转换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// 内部主键
    pub id: Uuid,
    /// 对外公开的请求标识符，如 `req_xxxxxxxxxxxxxxxx`
    pub request_id: String,
    /// 所属账户ID，所有读取操作都以此做权限隔离
    pub owner_id: Uuid,
    /// 目标URL
    pub url: String,
    /// 目标平台
    pub platform: Platform,
    /// 需要提取的字段
    pub fields: Vec<String>,
    /// 回调地址（仅保存）
    pub webhook_url: Option<String>,
    /// 生命周期状态
    pub status: ScrapeStatus,
    /// 结果数据，仅在 Completed 时存在
    pub result_data: Option<serde_json::Value>,
    /// 结果记录数
    pub result_count: i32,
    /// 错误信息，仅在 Failed 时存在
    pub error_message: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 终态转换时间
    pub completed_at: Option<DateTime<FixedOffset>>,
}

/// 抓取请求状态
///
/// 状态转换：
/// Pending → Processing → Completed/Failed
///
/// 提交操作直接创建 Processing 状态的记录，Pending 保留给
/// 未来在处理前增加排队阶段时使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    /// 等待处理
    Pending,
    /// 处理中
    Processing,
    /// 已完成
    Completed,
    /// 已失败（包括用户取消和超时）
    Failed,
}

impl ScrapeStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        match self {
            ScrapeStatus::Pending | ScrapeStatus::Processing => false,
            ScrapeStatus::Completed | ScrapeStatus::Failed => true,
        }
    }

    /// 所有非终态，用于批量条件更新
    pub fn active() -> [ScrapeStatus; 2] {
        [ScrapeStatus::Pending, ScrapeStatus::Processing]
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScrapeStatus::Pending => write!(f, "pending"),
            ScrapeStatus::Processing => write!(f, "processing"),
            ScrapeStatus::Completed => write!(f, "completed"),
            ScrapeStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScrapeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScrapeStatus::Pending),
            "processing" => Ok(ScrapeStatus::Processing),
            "completed" => Ok(ScrapeStatus::Completed),
            "failed" => Ok(ScrapeStatus::Failed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown scrape status: {}",
                other
            ))),
        }
    }
}

/// 支持的电商平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Amazon,
    Shopify,
    Ebay,
    Walmart,
    Etsy,
}

impl Platform {
    /// 全部支持的平台，顺序即错误信息中的展示顺序
    pub const ALL: [Platform; 5] = [
        Platform::Amazon,
        Platform::Shopify,
        Platform::Ebay,
        Platform::Walmart,
        Platform::Etsy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Shopify => "shopify",
            Platform::Ebay => "ebay",
            Platform::Walmart => "walmart",
            Platform::Etsy => "etsy",
        }
    }

    /// 以逗号分隔的平台列表
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Platform::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    /// 大小写不敏感地解析平台名称
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "Invalid platform '{}'. Supported: {}",
                    s,
                    Platform::supported_list()
                ))
            })
    }
}

/// 领域错误类型
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    /// 当前状态不允许该转换
    #[error("Invalid state transition from {from}")]
    InvalidStateTransition { from: ScrapeStatus },

    /// 输入不符合领域规则
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ScrapeRequest {
    /// 创建一个新的抓取请求
    ///
    /// 新请求直接处于 Processing 状态，并生成新的公开请求ID。
    pub fn new(
        owner_id: Uuid,
        url: String,
        platform: Platform,
        fields: Vec<String>,
        webhook_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id: generate_request_id(),
            owner_id,
            url,
            platform,
            fields,
            webhook_url,
            status: ScrapeStatus::Processing,
            result_data: None,
            result_count: 0,
            error_message: None,
            created_at: Utc::now().into(),
            completed_at: None,
        }
    }

    /// 完成请求并附加结果
    ///
    /// 只有 Processing 状态可以转换为 Completed
    pub fn complete(mut self, data: serde_json::Value, count: i32) -> Result<Self, DomainError> {
        match self.status {
            ScrapeStatus::Processing => {
                self.status = ScrapeStatus::Completed;
                self.result_data = Some(data);
                self.result_count = count;
                self.error_message = None;
                self.completed_at = Some(Utc::now().into());
                Ok(self)
            }
            from @ (ScrapeStatus::Pending | ScrapeStatus::Completed | ScrapeStatus::Failed) => {
                Err(DomainError::InvalidStateTransition { from })
            }
        }
    }

    /// 将请求标记为失败
    ///
    /// Pending 和 Processing 状态都可以失败
    pub fn fail(mut self, message: impl Into<String>) -> Result<Self, DomainError> {
        match self.status {
            ScrapeStatus::Pending | ScrapeStatus::Processing => {
                self.status = ScrapeStatus::Failed;
                self.result_data = None;
                self.error_message = Some(message.into());
                self.completed_at = Some(Utc::now().into());
                Ok(self)
            }
            from @ (ScrapeStatus::Completed | ScrapeStatus::Failed) => {
                Err(DomainError::InvalidStateTransition { from })
            }
        }
    }

    /// 用户取消请求
    pub fn cancel(self) -> Result<Self, DomainError> {
        self.fail(CANCELLED_BY_USER)
    }
}

#[cfg(test)]
#[path = "scrape_request_test.rs"]
mod tests;
