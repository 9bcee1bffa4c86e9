use crate::extract::{BODY_MARKER_REVIEW, split_body_and_references};
use crate::prompts::{self, PromptPair};
use crate::types::research::ReviewDraft;
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

fn parse_review(raw: &str) -> ExternalCallResult<ReviewDraft> {
    let (content, references) = split_body_and_references(raw, BODY_MARKER_REVIEW)
        .map_err(|e| StageError::from_marker(e, raw))?;
    Ok(ReviewDraft {
        content,
        references,
    })
}

/// 单一章节的文献探讨
pub struct SectionReviewSynthesis {
    pub section: usize,
}

impl SectionReviewSynthesis {
    pub fn new(section: usize) -> Self {
        Self { section }
    }
}

impl Stage for SectionReviewSynthesis {
    type Output = ReviewDraft;

    fn stage_type(&self) -> StageType {
        StageType::SectionReview
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        let has_literature = state
            .literature_for(self.section)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false);
        if !has_literature {
            return Err(StageError::MissingPrerequisite(format!(
                "第 {} 節的已收集文獻",
                self.section
            )));
        }
        Ok(())
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        let title = state
            .section(self.section)
            .map(|section| section.display_title())
            .unwrap_or_default();
        let entries = state.literature_for(self.section).unwrap_or_default();
        prompts::section_review(&title, entries)
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        parse_review(raw)
    }
}

/// 合并全部章节的完整文献探讨
pub struct FullReviewSynthesis;

impl Stage for FullReviewSynthesis {
    type Output = ReviewDraft;

    fn stage_type(&self) -> StageType {
        StageType::FullReview
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        if state.purpose().is_none() {
            return Err(StageError::MissingPrerequisite("研究目的內容".to_string()));
        }
        if !state.has_collected_literature() {
            return Err(StageError::MissingPrerequisite("任何章節的已收集文獻".to_string()));
        }
        Ok(())
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        prompts::full_review(
            state.selected_title(),
            state.purpose().unwrap_or_default(),
            state.sections(),
            state.collected_literature(),
        )
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        parse_review(raw)
    }
}
