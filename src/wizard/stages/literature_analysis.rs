use super::decode_json_list;
use crate::prompts::{self, PromptPair};
use crate::types::research::LiteratureEntry;
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

/// 分析贴入的多篇文献，整理成某一章节的文献条目
pub struct LiteratureAnalysis {
    pub section: usize,
    pub text: String,
}

impl LiteratureAnalysis {
    pub fn new(section: usize, text: impl Into<String>) -> Self {
        Self {
            section,
            text: text.into(),
        }
    }
}

impl Stage for LiteratureAnalysis {
    type Output = Vec<LiteratureEntry>;

    fn stage_type(&self) -> StageType {
        StageType::LiteratureAnalysis
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        if state.section(self.section).is_none() {
            return Err(StageError::MissingPrerequisite(format!(
                "文獻探討架構中的第 {} 節",
                self.section
            )));
        }
        if self.text.trim().is_empty() {
            return Err(StageError::MissingPrerequisite("文獻內容".to_string()));
        }
        Ok(())
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        let section_title = state
            .section(self.section)
            .map(|section| section.display_title())
            .unwrap_or_default();
        prompts::literature_analysis(&section_title, &self.text)
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        decode_json_list(raw, "literature")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::research::ReviewSection;
    use crate::wizard::state::StateUpdate;

    fn planned_state() -> WizardState {
        let mut state = WizardState::resumed("研究目的").unwrap();
        state
            .record(StateUpdate::SectionPlan(vec![ReviewSection {
                order: 1,
                title: "設計思考".to_string(),
                ..Default::default()
            }]))
            .unwrap();
        state
    }

    #[test]
    fn test_requires_planned_section() {
        let state = planned_state();
        assert!(LiteratureAnalysis::new(2, "文獻").check_prerequisites(&state).is_err());
        assert!(LiteratureAnalysis::new(1, "").check_prerequisites(&state).is_err());
        assert!(LiteratureAnalysis::new(1, "文獻").check_prerequisites(&state).is_ok());
    }

    #[test]
    fn test_prompt_names_section() {
        let prompts = LiteratureAnalysis::new(1, "Brown (2008)").build_prompts(&planned_state());
        assert!(prompts.user.contains("「設計思考」"));
        assert!(prompts.user.contains("Brown (2008)"));
    }

    #[test]
    fn test_parse_literature_entries() {
        let raw = r#"分析結果：
{
    "literature": [
        {
            "citation": "Brown, T. (2008). Design thinking. Harvard Business Review, 86(6), 84-92.",
            "abstract": "介紹設計思考",
            "relevance": "高",
            "contribution": "提出流程",
            "usage_suggestion": "作為理論基礎"
        },
        {
            "citation": "Norman, D. (2013). The design of everyday things.",
            "abstract": "日常用品設計"
        }
    ]
}"#;
        let entries = LiteratureAnalysis::new(1, "x").parse(raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].summary, "介紹設計思考");
        assert_eq!(entries[0].usage_suggestion, "作為理論基礎");
        assert_eq!(entries[1].relevance, "");
    }

    #[test]
    fn test_parse_entry_missing_citation() {
        let err = LiteratureAnalysis::new(1, "x")
            .parse(r#"{"literature": [{"abstract": "只有摘要"}]}"#)
            .unwrap_err();
        assert!(matches!(err, StageError::Malformed { .. }));
    }
}
