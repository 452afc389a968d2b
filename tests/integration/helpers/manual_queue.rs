use async_trait::async_trait;
use dataflow::queue::completion_queue::{CompletionQueue, QueueError};
use std::sync::Mutex;

/// 只记录提交的请求ID，由测试决定何时运行完成工作器
#[derive(Default)]
pub struct ManualCompletionQueue {
    submitted: Mutex<Vec<String>>,
}

impl ManualCompletionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出所有尚未处理的请求ID
    pub fn drain(&self) -> Vec<String> {
        self.submitted.lock().unwrap().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionQueue for ManualCompletionQueue {
    async fn submit(&self, request_id: &str) -> Result<(), QueueError> {
        self.submitted.lock().unwrap().push(request_id.to_string());
        Ok(())
    }
}
