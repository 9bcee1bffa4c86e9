use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct PurposeRecord {
    research_purpose: String,
}

/// 研究目的交接文件
///
/// 只保存最近一次生成的研究目的，供另外启动的文献探讨流程读取。不加锁，后写者覆盖先写者。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurposeStore {
    path: PathBuf,
}

impl PurposeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 覆盖写入研究目的
    pub fn save(&self, research_purpose: &str) -> Result<()> {
        let record = PurposeRecord {
            research_purpose: research_purpose.to_string(),
        };
        let content =
            serde_json::to_string(&record).context("Failed to serialize research purpose")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create directory: {}",
                    parent.display()
                ))?;
            }
        }

        fs::write(&self.path, content).context(format!(
            "Failed to write purpose file: {}",
            self.path.display()
        ))?;
        tracing::debug!(path = %self.path.display(), "research purpose saved");
        Ok(())
    }

    /// 读取研究目的；文件不存在或内容无法解析时返回空字符串
    pub fn load(&self) -> String {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "purpose file unreadable");
                return String::new();
            }
        };

        match serde_json::from_str::<PurposeRecord>(&content) {
            Ok(record) => record.research_purpose,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "purpose file malformed");
                String::new()
            }
        }
    }
}
