// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::workers::worker::Worker;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 持有后台工作器的任务句柄，关闭时统一中止
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在独立任务上启动工作器
    pub fn spawn<W>(&mut self, worker: W)
    where
        W: Worker + 'static,
    {
        let name = worker.name();
        info!("Starting worker {}", name);

        let handle = tokio::spawn(async move {
            match worker.run().await {
                Ok(()) => info!("Worker {} exited", name),
                Err(e) => error!("Worker {} stopped with error: {}", name, e),
            }
        });
        self.handles.push((name, handle));
    }

    /// 已启动的工作器数量
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 中止所有工作器
    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            info!("Worker {} aborted", name);
        }
        info!("Workers shut down successfully");
    }
}
