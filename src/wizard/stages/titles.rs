use crate::extract::parse_title_candidates;
use crate::prompts::{self, PromptPair};
use crate::types::research::TitleCandidate;
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

/// 根据主题、内容与文献摘要生成三个研究题目
pub struct TitleGeneration {
    pub literature_summary: String,
}

impl TitleGeneration {
    pub fn new(literature_summary: impl Into<String>) -> Self {
        Self {
            literature_summary: literature_summary.into(),
        }
    }
}

impl Stage for TitleGeneration {
    type Output = Vec<TitleCandidate>;

    fn stage_type(&self) -> StageType {
        StageType::Titles
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        if state.research_topic().trim().is_empty() {
            return Err(StageError::MissingPrerequisite("研究主題".to_string()));
        }
        if state.selected_keywords().is_empty() {
            return Err(StageError::MissingPrerequisite("選定的關鍵詞".to_string()));
        }
        if self.literature_summary.trim().is_empty() {
            return Err(StageError::MissingPrerequisite("文獻摘要".to_string()));
        }
        Ok(())
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        prompts::titles(
            state.research_topic(),
            state.research_content(),
            &self.literature_summary,
        )
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        parse_title_candidates(raw).map_err(|e| StageError::from_marker(e, raw))
    }
}
