use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// research-scribe - 由AI辅助的研究写作向导
#[derive(Parser, Debug)]
#[command(name = "research-scribe")]
#[command(
    about = "Guided research-writing assistant: from topic and keywords to titles, research purpose and literature review."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, moonshot, deepseek, mistral, openrouter, anthropic, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// 模型名称
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// 阶段未指定输出上限时的最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 研究目的交接文件
    #[arg(long, global = true)]
    pub purpose_file: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 日志详细程度（-v, -vv）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 启动前检查模型连接
    #[arg(long, global = true)]
    pub check_connection: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 从研究主题开始的完整向导（默认）
    Purpose,
    /// 直接进入文献探讨阶段
    Literature {
        /// 研究目的；未提供时读取交接文件
        #[arg(long)]
        purpose: Option<String>,
    },
}

impl Args {
    /// 要执行的命令，未指定时为完整向导
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Purpose)
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .context(format!("无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path).context(format!(
                    "无法读取默认配置文件 {:?}",
                    default_config_path
                ))?
            } else {
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用 {}",
                    provider_str, config.llm.provider
                ),
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }

        // 文件位置
        if let Some(purpose_file) = self.purpose_file {
            config.purpose_file = purpose_file;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        config.verbose = config.verbose.max(self.verbose);

        Ok(config)
    }
}
