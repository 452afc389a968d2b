// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_request::PROCESSING_TIMED_OUT;
use crate::domain::repositories::scrape_request_repository::ScrapeRequestRepository;
use crate::infrastructure::metrics::SCRAPE_REQUESTS_FAILED;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// 过期请求清理工作器
///
/// 定期把长时间停留在 Pending/Processing 的请求标记为失败，
/// 回收进程在提交与执行之间崩溃而遗留的记录
pub struct StaleRequestWorker<R>
where
    R: ScrapeRequestRepository + 'static,
{
    repository: Arc<R>,
    interval: Duration,
    stale_after: chrono::Duration,
}

impl<R> StaleRequestWorker<R>
where
    R: ScrapeRequestRepository + 'static,
{
    pub fn new(repository: Arc<R>, interval: Duration, stale_after: chrono::Duration) -> Self {
        Self {
            repository,
            interval,
            stale_after,
        }
    }

    /// 执行一次清理
    ///
    /// # 返回值
    ///
    /// 被标记为失败的请求数量
    pub async fn sweep(&self) -> Result<u64, WorkerError> {
        // 截止时间早于可表示的最早时间时不可能有过期请求
        let Some(cutoff) = Utc::now().checked_sub_signed(self.stale_after) else {
            return Ok(0);
        };
        let count = self
            .repository
            .fail_stale(cutoff, PROCESSING_TIMED_OUT)
            .await?;

        if count > 0 {
            counter!(SCRAPE_REQUESTS_FAILED, "reason" => "stale").increment(count);
            info!("Failed {} stale scrape requests", count);
        }

        Ok(count)
    }
}

#[async_trait]
impl<R> Worker for StaleRequestWorker<R>
where
    R: ScrapeRequestRepository + 'static,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Stale request worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            if let Err(e) = self.sweep().await {
                error!("Failed to sweep stale scrape requests: {}", e);
            }
        }
    }

    fn name(&self) -> &'static str {
        "stale_request_worker"
    }
}

#[cfg(test)]
#[path = "stale_request_worker_test.rs"]
mod tests;
