use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wizard::WizardState;

mod markdown;
pub mod purpose_store;

pub use purpose_store::PurposeStore;

/// 研究目的文档的文件名
pub const PURPOSE_DOC: &str = "research_purpose.md";
/// 文献探讨文档的文件名
pub const LITERATURE_REVIEW_DOC: &str = "literature_review.md";

/// 把会话中已生成的内容导出为 Markdown 文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutlet {
    output_dir: PathBuf,
}

impl DocumentOutlet {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写入已有内容对应的文档，返回写入的文件路径
    pub fn save(&self, state: &WizardState) -> Result<Vec<PathBuf>> {
        println!("\n🖊️ 文件儲存中...");
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let documents = [
            (PURPOSE_DOC, markdown::render_purpose(state, &generated_at)),
            (
                LITERATURE_REVIEW_DOC,
                markdown::render_literature_review(state, &generated_at),
            ),
        ];

        let mut written = Vec::new();
        for (file_name, content) in documents {
            let Some(content) = content else {
                eprintln!("⚠️ 尚無內容，略過: {}", file_name);
                continue;
            };

            if written.is_empty() {
                fs::create_dir_all(&self.output_dir).context(format!(
                    "Failed to create output directory: {}",
                    self.output_dir.display()
                ))?;
            }

            let path = self.output_dir.join(file_name);
            fs::write(&path, content)
                .context(format!("Failed to write document: {}", path.display()))?;
            println!("💾 已儲存文件: {}", path.display());
            written.push(path);
        }

        if !written.is_empty() {
            println!("💾 文件儲存完成，輸出目錄: {}", self.output_dir.display());
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::research::{LiteratureEntry, ReviewDraft, ReviewSection, TitleCandidate};
    use crate::wizard::StateUpdate;
    use tempfile::TempDir;

    fn state_with_purpose() -> WizardState {
        let mut state = WizardState::new();
        state
            .record(StateUpdate::TitleCandidates(vec![TitleCandidate {
                r#type: "1. 理論導向：".to_string(),
                title: "設計思考研究 / A Study of Design Thinking".to_string(),
                description: "（聚焦理論框架）".to_string(),
            }]))
            .unwrap();
        state.record(StateUpdate::SelectedTitle(0)).unwrap();
        state
            .record(StateUpdate::Purpose {
                purpose: "本研究旨在探討設計思考。".to_string(),
                references: "Brown, T. (2008). Design thinking.".to_string(),
            })
            .unwrap();
        state
    }

    #[test]
    fn test_save_empty_state_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("docs");
        let outlet = DocumentOutlet::new(&output);

        let written = outlet.save(&WizardState::new()).unwrap();
        assert!(written.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_save_purpose_only() {
        let temp_dir = TempDir::new().unwrap();
        let outlet = DocumentOutlet::new(temp_dir.path().join("docs"));

        let written = outlet.save(&state_with_purpose()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with(PURPOSE_DOC));

        let doc = fs::read_to_string(&written[0]).unwrap();
        assert!(doc.contains("設計思考研究 / A Study of Design Thinking"));
        assert!(doc.contains("本研究旨在探討設計思考。"));
        assert!(doc.contains("## 參考文獻"));
        assert!(doc.contains("生成時間"));
    }

    #[test]
    fn test_save_literature_review() {
        let temp_dir = TempDir::new().unwrap();
        let outlet = DocumentOutlet::new(temp_dir.path());

        let mut state = state_with_purpose();
        state
            .record(StateUpdate::SectionPlan(vec![ReviewSection {
                order: 1,
                title: "設計思考".to_string(),
                title_en: "Design Thinking".to_string(),
                ..Default::default()
            }]))
            .unwrap();
        state
            .record(StateUpdate::Literature {
                section: 1,
                entries: vec![LiteratureEntry::manual("Brown (2008)", "摘要內容")],
            })
            .unwrap();
        state
            .record(StateUpdate::SectionReview {
                section: 1,
                draft: ReviewDraft {
                    content: "本節論述".to_string(),
                    references: "Brown, T. (2008).".to_string(),
                },
            })
            .unwrap();

        let written = outlet.save(&state).unwrap();
        assert_eq!(written.len(), 2);

        let doc = fs::read_to_string(temp_dir.path().join(LITERATURE_REVIEW_DOC)).unwrap();
        assert!(doc.contains("## 1. 設計思考 / Design Thinking"));
        assert!(doc.contains("1. Brown (2008)"));
        assert!(doc.contains("摘要：摘要內容"));
        assert!(doc.contains("本節論述"));
        assert!(!doc.contains("完整文獻探討"));
    }
}
