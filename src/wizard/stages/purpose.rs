use crate::extract::{BODY_MARKER_PURPOSE, split_body_and_references};
use crate::prompts::{self, PromptPair};
use crate::types::research::{ReviewDraft, TitleCandidate};
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

/// 根据选定题目生成研究目的与参考文献
pub struct PurposeGeneration;

impl Stage for PurposeGeneration {
    type Output = ReviewDraft;

    fn stage_type(&self) -> StageType {
        StageType::Purpose
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        if state.selected_title().is_none() {
            return Err(StageError::MissingPrerequisite("選定的研究題目".to_string()));
        }
        Ok(())
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        let fallback = TitleCandidate::default();
        prompts::purpose(
            state.research_topic(),
            state.research_content(),
            state.literature_summary(),
            state.selected_title().unwrap_or(&fallback),
        )
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        let (content, references) = split_body_and_references(raw, BODY_MARKER_PURPOSE)
            .map_err(|e| StageError::from_marker(e, raw))?;
        Ok(ReviewDraft {
            content,
            references,
        })
    }
}
