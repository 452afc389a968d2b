// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_request::{ScrapeRequest, ScrapeStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// 抓取请求仓库特质
///
/// 定义抓取请求的数据访问接口。所有终态写入都是以状态为
/// 条件的比较并交换，调用方通过返回值判断是否赢得竞争。
#[async_trait]
pub trait ScrapeRequestRepository: Send + Sync {
    /// 创建新请求
    async fn create(&self, request: &ScrapeRequest) -> Result<ScrapeRequest, RepositoryError>;

    /// 根据公开请求ID查找（不做归属过滤，仅供后台任务使用）
    async fn find_by_request_id(
        &self,
        request_id: &str,
    ) -> Result<Option<ScrapeRequest>, RepositoryError>;

    /// 根据公开请求ID和所属账户查找
    async fn find_for_owner(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<Option<ScrapeRequest>, RepositoryError>;

    /// 按创建时间倒序分页列出账户的请求，同时返回总数
    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<ScrapeRequest>, u64), RepositoryError>;

    /// 写入状态转换
    ///
    /// 仅当数据库中的状态仍为 `expected` 时才写入 `request` 的
    /// 状态、结果、错误信息和完成时间。
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 写入成功
    /// * `Ok(false)` - 状态已被其他写入方改变
    async fn transition(
        &self,
        request: &ScrapeRequest,
        expected: ScrapeStatus,
    ) -> Result<bool, RepositoryError>;

    /// 将创建时间早于 `cutoff` 的非终态请求标记为失败
    async fn fail_stale(
        &self,
        cutoff: DateTime<Utc>,
        message: &str,
    ) -> Result<u64, RepositoryError>;
}
