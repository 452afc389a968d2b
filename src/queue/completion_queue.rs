// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_request::PROCESSING_TIMED_OUT;
use crate::domain::repositories::scrape_request_repository::ScrapeRequestRepository;
use crate::workers::completion_worker::CompletionWorker;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 无法调度后台任务
    #[error("Completion queue unavailable: {0}")]
    Unavailable(String),
}

/// 完成队列特质
///
/// 提交接口在记录落库后把请求ID交给队列，由队列决定何时、
/// 以何种超时策略运行完成工作器
#[async_trait]
pub trait CompletionQueue: Send + Sync {
    /// 提交一个请求ID，调用方不等待处理结果
    async fn submit(&self, request_id: &str) -> Result<(), QueueError>;
}

#[async_trait]
impl<T: CompletionQueue + ?Sized> CompletionQueue for Arc<T> {
    async fn submit(&self, request_id: &str) -> Result<(), QueueError> {
        (**self).submit(request_id).await
    }
}

/// 基于 tokio 任务的完成队列
///
/// 每个请求在独立的分离任务上运行，丢弃句柄不会取消任务。
/// 超时后把记录标记为失败。
pub struct SpawnedCompletionQueue<R>
where
    R: ScrapeRequestRepository + 'static,
{
    worker: Arc<CompletionWorker<R>>,
    timeout: Duration,
}

impl<R> SpawnedCompletionQueue<R>
where
    R: ScrapeRequestRepository + 'static,
{
    pub fn new(worker: Arc<CompletionWorker<R>>, timeout: Duration) -> Self {
        Self { worker, timeout }
    }
}

#[async_trait]
impl<R> CompletionQueue for SpawnedCompletionQueue<R>
where
    R: ScrapeRequestRepository + 'static,
{
    async fn submit(&self, request_id: &str) -> Result<(), QueueError> {
        let handle = Handle::try_current().map_err(|e| QueueError::Unavailable(e.to_string()))?;

        let worker = self.worker.clone();
        let timeout = self.timeout;
        let request_id = request_id.to_string();

        handle.spawn(async move {
            match tokio::time::timeout(timeout, worker.process(&request_id)).await {
                Ok(Ok(outcome)) => {
                    debug!("Completion of {} finished: {:?}", request_id, outcome);
                }
                Ok(Err(e)) => {
                    error!("Completion of {} failed: {}", request_id, e);
                }
                Err(_) => {
                    warn!(
                        "Completion of {} exceeded {}s",
                        request_id,
                        timeout.as_secs()
                    );
                    if let Err(e) = worker
                        .fail(&request_id, PROCESSING_TIMED_OUT, "timeout")
                        .await
                    {
                        error!("Failed to mark {} as timed out: {}", request_id, e);
                    }
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
#[path = "completion_queue_test.rs"]
mod tests;
