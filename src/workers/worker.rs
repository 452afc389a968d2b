// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::WorkerError;
use async_trait::async_trait;

/// 长期运行的后台工作器
///
/// 由 `WorkerManager` 在独立任务中驱动，`run` 正常情况下不会返回；
/// 返回错误时由管理器记录日志后结束该任务
#[async_trait]
pub trait Worker: Send + Sync {
    /// 运行工作器主循环
    async fn run(&self) -> Result<(), WorkerError>;

    /// 工作器名称，用于日志与关闭时的标识
    fn name(&self) -> &'static str;
}
