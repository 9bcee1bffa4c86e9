//! LLM客户端 - 提供统一的模型服务接口

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

mod providers;
pub mod scripted;
pub mod types;

use providers::ProviderClient;
pub use scripted::ScriptedModel;
pub use types::{ChatMessage, ChatRequest, LlmError, Role};

/// 文本生成服务
///
/// 向导只依赖这个接口；进程入口创建真实客户端后注入，测试时替换为 [`ScriptedModel`]。
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 发送一次对话请求，返回生成的整段文本
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;
}

/// 基于rig的LLM客户端
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在檢查模型連線...");
        let request = ChatRequest::new(&self.config.llm.model, 0.0)
            .system("You are a helpful assistant.")
            .user("Hello")
            .max_tokens(Some(16));

        match self.complete(request).await {
            Ok(_) => {
                println!("✅ 模型連線正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型連線失敗: {}", e);
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl ChatModel for LLMClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        let max_tokens = request.max_tokens.unwrap_or(self.config.llm.max_tokens);
        let agent = self.client.create_agent(
            &request.model,
            &request.joined(Role::System),
            request.temperature,
            max_tokens.into(),
        );

        tracing::debug!(
            provider = %self.config.llm.provider,
            model = %request.model,
            temperature = request.temperature,
            max_tokens,
            "sending chat request"
        );

        let response = agent
            .prompt(&request.joined(Role::User))
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if response.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(response)
    }
}
