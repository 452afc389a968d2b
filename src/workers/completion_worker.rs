// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_request::{ScrapeRequest, ScrapeStatus};
use crate::domain::repositories::scrape_request_repository::ScrapeRequestRepository;
use crate::engines::traits::ScrapeExecutor;
use crate::infrastructure::metrics::{SCRAPE_REQUESTS_COMPLETED, SCRAPE_REQUESTS_FAILED};
use crate::utils::errors::WorkerError;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 单次完成处理的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// 记录已写入 Completed
    Completed,
    /// 记录已写入 Failed
    Failed,
    /// 记录不存在、已是终态或状态已被其他写入方改变
    Skipped,
}

/// 抓取请求完成工作器
///
/// 每个新建的请求由完成队列调用一次 `process`。所有终态写入都以
/// 读取时观察到的状态为条件，先提交者获胜。
pub struct CompletionWorker<R>
where
    R: ScrapeRequestRepository + 'static,
{
    repository: Arc<R>,
    executor: Arc<dyn ScrapeExecutor>,
}

impl<R> CompletionWorker<R>
where
    R: ScrapeRequestRepository + 'static,
{
    pub fn new(repository: Arc<R>, executor: Arc<dyn ScrapeExecutor>) -> Self {
        Self {
            repository,
            executor,
        }
    }

    /// 处理一个抓取请求
    ///
    /// 执行器的错误会写入记录的 `error_message`，不会向上传播。
    ///
    /// # 参数
    ///
    /// * `request_id` - 对外请求ID
    ///
    /// # 返回值
    ///
    /// * `Ok(CompletionOutcome)` - 本次处理的结果
    /// * `Err(WorkerError)` - 存储层错误
    pub async fn process(&self, request_id: &str) -> Result<CompletionOutcome, WorkerError> {
        let request = match self.repository.find_by_request_id(request_id).await? {
            Some(request) => request,
            None => {
                warn!("Scrape request {} not found, skipping", request_id);
                return Ok(CompletionOutcome::Skipped);
            }
        };

        if request.status != ScrapeStatus::Processing {
            debug!(
                "Scrape request {} is {}, nothing to complete",
                request_id, request.status
            );
            return Ok(CompletionOutcome::Skipped);
        }

        debug!(
            "Running {} executor for {}",
            self.executor.name(),
            request_id
        );

        match self.executor.execute(&request).await {
            Ok(output) => {
                let completed = request
                    .complete(output.data, output.count)
                    .map_err(|e| WorkerError::Internal(e.to_string()))?;

                if self
                    .repository
                    .transition(&completed, ScrapeStatus::Processing)
                    .await?
                {
                    counter!(SCRAPE_REQUESTS_COMPLETED).increment(1);
                    info!(
                        "Scrape request {} completed with {} records",
                        request_id, completed.result_count
                    );
                    Ok(CompletionOutcome::Completed)
                } else {
                    info!(
                        "Scrape request {} changed state during processing, discarding result",
                        request_id
                    );
                    Ok(CompletionOutcome::Skipped)
                }
            }
            Err(e) => {
                warn!("Executor failed for {}: {}", request_id, e);
                self.write_failure(request, &e.to_string(), "executor")
                    .await
            }
        }
    }

    /// 将非终态请求标记为失败
    ///
    /// 供完成队列在超时等情况下使用
    pub async fn fail(
        &self,
        request_id: &str,
        message: &str,
        reason: &'static str,
    ) -> Result<CompletionOutcome, WorkerError> {
        match self.repository.find_by_request_id(request_id).await? {
            Some(request) if !request.status.is_terminal() => {
                self.write_failure(request, message, reason).await
            }
            _ => Ok(CompletionOutcome::Skipped),
        }
    }

    async fn write_failure(
        &self,
        request: ScrapeRequest,
        message: &str,
        reason: &'static str,
    ) -> Result<CompletionOutcome, WorkerError> {
        let observed = request.status;
        let failed = request
            .fail(message)
            .map_err(|e| WorkerError::Internal(e.to_string()))?;

        if self.repository.transition(&failed, observed).await? {
            counter!(SCRAPE_REQUESTS_FAILED, "reason" => reason).increment(1);
            info!("Scrape request {} failed: {}", failed.request_id, message);
            Ok(CompletionOutcome::Failed)
        } else {
            info!(
                "Scrape request {} already reached a terminal state",
                failed.request_id
            );
            Ok(CompletionOutcome::Skipped)
        }
    }
}

#[cfg(test)]
#[path = "completion_worker_test.rs"]
mod tests;
