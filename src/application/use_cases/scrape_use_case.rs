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

use crate::{
    application::dto::{
        scrape_request::{ScrapeHistoryQuery, ScrapeRequestDto},
        scrape_response::{ScrapeResultsResponse, ScrapeStatusResponse},
    },
    domain::{
        models::{
            account::Account,
            scrape_request::{Platform, ScrapeRequest, ScrapeStatus},
        },
        repositories::scrape_request_repository::{RepositoryError, ScrapeRequestRepository},
    },
    infrastructure::metrics::{SCRAPE_REQUESTS_CANCELLED, SCRAPE_REQUESTS_CREATED, SCRAPE_REQUESTS_FAILED},
    queue::completion_queue::{CompletionQueue, QueueError},
};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum ScrapeUseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Scraping request not found")]
    NotFound,
    #[error("{0}")]
    InvalidState(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// 抓取请求用例
///
/// 负责提交、查询、取消抓取请求。所有读取都以调用方账户做隔离，
/// 不属于调用方的请求与不存在的请求返回同样的 NotFound。
pub struct ScrapeUseCase<R, Q> {
    repository: Arc<R>,
    queue: Arc<Q>,
    estimated_time: String,
}

impl<R, Q> ScrapeUseCase<R, Q>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    pub fn new(repository: Arc<R>, queue: Arc<Q>, estimated_time: impl Into<String>) -> Self {
        Self {
            repository,
            queue,
            estimated_time: estimated_time.into(),
        }
    }

    /// 提交抓取请求
    ///
    /// 校验顺序：订阅等级、平台、URL。任何校验失败都不会创建记录。
    /// 记录落库后再提交给完成队列。
    pub async fn create(
        &self,
        account: &Account,
        dto: ScrapeRequestDto,
    ) -> Result<ScrapeRequest, ScrapeUseCaseError> {
        if !account.plan.allows_custom_scrape() {
            return Err(ScrapeUseCaseError::Forbidden(
                "Custom scraping is not available on the free plan".to_string(),
            ));
        }

        let platform: Platform = dto.platform.parse().map_err(|_| {
            ScrapeUseCaseError::Validation(format!(
                "Invalid platform. Supported: {}",
                Platform::supported_list()
            ))
        })?;

        dto.validate()
            .map_err(|e| ScrapeUseCaseError::Validation(e.to_string()))?;

        let request = ScrapeRequest::new(
            account.id,
            dto.url,
            platform,
            dto.fields.unwrap_or_default(),
            dto.webhook,
        );
        let created = self.repository.create(&request).await?;
        counter!(SCRAPE_REQUESTS_CREATED).increment(1);
        info!(
            "Scrape request {} created for {} on {}",
            created.request_id, account.id, created.platform
        );

        if let Err(e) = self.queue.submit(&created.request_id).await {
            error!("Failed to submit {}: {}", created.request_id, e);
            self.fail_unscheduled(&created, &e).await;
            return Err(e.into());
        }

        Ok(created)
    }

    /// 提交响应，附带预计耗时
    pub fn submission_response(&self, request: &ScrapeRequest) -> ScrapeStatusResponse {
        ScrapeStatusResponse {
            estimated_time: Some(self.estimated_time.clone()),
            ..ScrapeStatusResponse::from(request)
        }
    }

    /// 获取属于调用方的抓取请求
    pub async fn get(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<ScrapeRequest, ScrapeUseCaseError> {
        self.repository
            .find_for_owner(request_id, owner_id)
            .await?
            .ok_or(ScrapeUseCaseError::NotFound)
    }

    /// 分页列出调用方的抓取请求，按创建时间倒序
    pub async fn list(
        &self,
        owner_id: Uuid,
        query: ScrapeHistoryQuery,
    ) -> Result<(Vec<ScrapeRequest>, u64), ScrapeUseCaseError> {
        query
            .validate()
            .map_err(|e| ScrapeUseCaseError::Validation(e.to_string()))?;

        Ok(self
            .repository
            .list_for_owner(owner_id, query.limit, query.offset)
            .await?)
    }

    /// 取消抓取请求
    ///
    /// 只更新存储，不会中断正在执行的工作器
    pub async fn cancel(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<ScrapeRequest, ScrapeUseCaseError> {
        let request = self.get(request_id, owner_id).await?;
        let observed = request.status;

        let cancelled = request
            .cancel()
            .map_err(|_| not_cancellable(observed))?;

        if self.repository.transition(&cancelled, observed).await? {
            counter!(SCRAPE_REQUESTS_CANCELLED).increment(1);
            info!("Scrape request {} cancelled", request_id);
            return Ok(cancelled);
        }

        // Lost the race to another terminal write; report what won.
        let current = self.get(request_id, owner_id).await?;
        Err(not_cancellable(current.status))
    }

    /// 查询状态
    pub async fn get_status(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<ScrapeStatusResponse, ScrapeUseCaseError> {
        let request = self.get(request_id, owner_id).await?;
        Ok(ScrapeStatusResponse::from(&request))
    }

    /// 获取结果，仅 Completed 状态可用
    pub async fn get_results(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<ScrapeResultsResponse, ScrapeUseCaseError> {
        let request = self.get(request_id, owner_id).await?;

        match request.status {
            ScrapeStatus::Completed => Ok(ScrapeResultsResponse {
                request_id: request.request_id,
                data: request.result_data,
                record_count: request.result_count,
            }),
            ScrapeStatus::Pending | ScrapeStatus::Processing => Err(
                ScrapeUseCaseError::InvalidState(format!("Scraping is still {}", request.status)),
            ),
            ScrapeStatus::Failed => Err(ScrapeUseCaseError::InvalidState(
                "Scraping failed, no results available".to_string(),
            )),
        }
    }

    async fn fail_unscheduled(&self, request: &ScrapeRequest, cause: &QueueError) {
        let failed = match request.clone().fail(cause.to_string()) {
            Ok(failed) => failed,
            Err(_) => return,
        };

        match self.repository.transition(&failed, request.status).await {
            Ok(true) => {
                counter!(SCRAPE_REQUESTS_FAILED, "reason" => "queue").increment(1);
            }
            Ok(false) => {}
            Err(e) => error!(
                "Failed to mark unscheduled request {} as failed: {}",
                request.request_id, e
            ),
        }
    }
}

fn not_cancellable(status: ScrapeStatus) -> ScrapeUseCaseError {
    ScrapeUseCaseError::InvalidState(format!(
        "Only pending or processing requests can be cancelled (current status: {})",
        status
    ))
}

#[cfg(test)]
#[path = "scrape_use_case_test.rs"]
mod tests;
