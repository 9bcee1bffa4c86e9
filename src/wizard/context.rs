use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::llm::client::{ChatModel, LLMClient};
use crate::outlet::{DocumentOutlet, PurposeStore};

/// 向导运行所需的外部依赖
#[derive(Clone)]
pub struct WizardContext {
    /// 文本生成服务
    pub model: Arc<dyn ChatModel>,
    /// 配置
    pub config: Config,
    /// 研究目的交接文件
    pub purpose_store: PurposeStore,
    /// 文档导出
    pub document_outlet: DocumentOutlet,
}

impl WizardContext {
    /// 使用配置中的模型服务创建上下文
    pub fn new(config: Config) -> Result<Self> {
        let client = LLMClient::new(config.clone())?;
        Ok(Self::with_model(config, Arc::new(client)))
    }

    /// 注入指定的模型服务
    pub fn with_model(config: Config, model: Arc<dyn ChatModel>) -> Self {
        let purpose_store = PurposeStore::new(&config.purpose_file);
        let document_outlet = DocumentOutlet::new(&config.output_path);
        Self {
            model,
            config,
            purpose_store,
            document_outlet,
        }
    }
}
