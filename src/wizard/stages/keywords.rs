use crate::extract::parse_keyword_lines;
use crate::prompts::{self, PromptPair};
use crate::wizard::error::{ExternalCallResult, StageError};
use crate::wizard::stage::{Stage, StageType};
use crate::wizard::state::WizardState;

/// 从研究主题与内容提取中英对照关键词
pub struct KeywordExtraction {
    pub topic: String,
    pub content: String,
}

impl KeywordExtraction {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
        }
    }
}

impl Stage for KeywordExtraction {
    type Output = Vec<String>;

    fn stage_type(&self) -> StageType {
        StageType::Keywords
    }

    fn check_prerequisites(&self, _state: &WizardState) -> ExternalCallResult<()> {
        if self.topic.trim().is_empty() {
            return Err(StageError::MissingPrerequisite("研究主題".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(StageError::MissingPrerequisite("研究內容".to_string()));
        }
        Ok(())
    }

    fn build_prompts(&self, _state: &WizardState) -> PromptPair {
        prompts::keywords(&self.topic, &self.content)
    }

    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output> {
        parse_keyword_lines(raw).map_err(|e| StageError::from_marker(e, raw))
    }
}
