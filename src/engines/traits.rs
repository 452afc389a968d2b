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

use crate::domain::models::scrape_request::ScrapeRequest;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 抓取产出
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOutput {
    /// 抓取到的数据
    pub data: Value,
    /// 记录条数
    pub count: i32,
}

/// 抓取执行器特质
///
/// 完成工作器通过该特质获得抓取结果，具体的抓取实现可替换
#[async_trait]
pub trait ScrapeExecutor: Send + Sync {
    /// 执行抓取
    async fn execute(&self, request: &ScrapeRequest) -> Result<ScrapeOutput, EngineError>;

    /// 执行器名称
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: ScrapeExecutor + ?Sized> ScrapeExecutor for Arc<T> {
    async fn execute(&self, request: &ScrapeRequest) -> Result<ScrapeOutput, EngineError> {
        (**self).execute(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
