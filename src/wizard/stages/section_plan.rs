use serde::Deserialize;

use super::decode_json_list;
use crate::prompts::{self, PromptPair};
use crate::types::research::{ReviewSection, SearchQuery, Subtitle};
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

#[derive(Debug, Deserialize)]
struct PlannedSection {
    #[serde(alias = "title")]
    title_zh: String,
    #[serde(default)]
    title_en: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subtitles: Vec<Subtitle>,
    #[serde(default, alias = "search_strings")]
    search_queries: Vec<SearchQuery>,
}

/// 根据研究目的规划文献探讨章节
pub struct SectionPlanning;

impl Stage for SectionPlanning {
    type Output = Vec<ReviewSection>;

    fn stage_type(&self) -> StageType {
        StageType::SectionPlan
    }

    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()> {
        match state.purpose() {
            Some(purpose) if !purpose.trim().is_empty() => Ok(()),
            _ => Err(StageError::MissingPrerequisite("研究目的內容".to_string())),
        }
    }

    fn build_prompts(&self, state: &WizardState) -> PromptPair {
        prompts::section_plan(state.purpose().unwrap_or_default())
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        let planned: Vec<PlannedSection> = decode_json_list(raw, "sections")?;
        Ok(planned
            .into_iter()
            .enumerate()
            .map(|(i, section)| ReviewSection {
                order: i + 1,
                title: section.title_zh,
                title_en: section.title_en,
                description: section.description,
                subtitles: section.subtitles,
                search_queries: section.search_queries,
            })
            .collect())
    }
}
