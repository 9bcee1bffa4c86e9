//! 预置回应的模型替身，用于离线演练与测试

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ChatModel;
use super::types::{ChatRequest, LlmError};

/// 按顺序返回预置回应的模型，同时记录收到的每个请求
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以一组成功回应创建
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies = replies.into_iter().map(|r| Ok(r.into())).collect();
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(reply.into()));
    }

    pub async fn push_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Err(LlmError::Transport(message.into())));
    }

    /// 已收到的请求数
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// 已收到的请求副本
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("沒有預置的回應".to_string())))
    }
}
