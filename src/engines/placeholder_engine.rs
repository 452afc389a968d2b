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

use super::traits::{EngineError, ScrapeExecutor, ScrapeOutput};
use crate::domain::models::scrape_request::ScrapeRequest;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// 占位抓取执行器
///
/// 不访问目标站点，返回固定格式的样例数据。
/// 可配置模拟延迟用于观察 Processing 状态。
#[derive(Debug, Clone, Default)]
pub struct PlaceholderExecutor {
    simulated_delay: Duration,
}

impl PlaceholderExecutor {
    pub fn new(simulated_delay: Duration) -> Self {
        Self { simulated_delay }
    }
}

#[async_trait]
impl ScrapeExecutor for PlaceholderExecutor {
    async fn execute(&self, request: &ScrapeRequest) -> Result<ScrapeOutput, EngineError> {
        if !self.simulated_delay.is_zero() {
            debug!(
                "Simulating {}ms of scraping for {}",
                self.simulated_delay.as_millis(),
                request.request_id
            );
            tokio::time::sleep(self.simulated_delay).await;
        }

        Ok(ScrapeOutput {
            data: json!({
                "scraped": true,
                "url": request.url,
                "data": {"sample": "Scraped data would appear here"},
            }),
            count: 1,
        })
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
