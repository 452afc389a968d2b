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

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 抓取请求数据传输对象
///
/// 用于封装客户端提交的自定义URL抓取请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ScrapeRequestDto {
    /// 要抓取的网页URL
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    /// 目标平台，大小写不敏感
    pub platform: String,
    /// 需要提取的字段
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    /// 回调Webhook地址
    #[validate(url(message = "webhook must be a valid URL"))]
    pub webhook: Option<String>,
}

/// 抓取历史查询参数
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ScrapeHistoryQuery {
    /// 每页数量
    #[serde(default = "default_limit")]
    #[validate(range(max = 100, message = "limit must be at most 100"))]
    pub limit: u64,
    /// 分页偏移，上限为数据库可接受的 i64 最大值
    #[serde(default)]
    #[validate(range(
        max = 9_223_372_036_854_775_807u64,
        message = "offset is out of range"
    ))]
    pub offset: u64,
}

fn default_limit() -> u64 {
    20
}

impl Default for ScrapeHistoryQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
