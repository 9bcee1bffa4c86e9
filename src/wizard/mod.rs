//! 研究写作向导：按步骤推进的状态机

use std::path::PathBuf;

use crate::types::research::{LiteratureEntry, ReviewDraft, ReviewSection, TitleCandidate};

pub mod context;
pub mod error;
pub mod search;
pub mod stage;
pub mod stages;
pub mod state;

pub use context::WizardContext;
pub use error::{ExternalCallResult, StageError, WizardError};
pub use stage::{CallParams, Stage, StageType};
pub use state::{StateUpdate, WizardState, WizardStep};

use stages::{
    FullReviewSynthesis, KeywordExtraction, LiteratureAnalysis, PurposeGeneration,
    SectionPlanning, SectionReviewSynthesis, TitleGeneration,
};

/// 用户触发的向导操作
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    GenerateKeywords { topic: String, content: String },
    SelectKeywords(Vec<String>),
    GenerateTitles { literature_summary: String },
    /// 从 0 开始的题目序号
    SelectTitle(usize),
    GeneratePurpose,
    EnterLiteratureReview,
    PlanSections,
    AnalyzeLiterature { section: usize, text: String },
    AddLiterature {
        section: usize,
        citation: String,
        summary: String,
    },
    GenerateSectionReview { section: usize },
    GenerateFullReview,
}

/// 操作成功后的产出
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Keywords(Vec<String>),
    SearchQuery {
        query: String,
        /// 链接生成失败时为 None
        url: Option<String>,
    },
    TitleCandidates(Vec<TitleCandidate>),
    TitleSelected(TitleCandidate),
    Purpose {
        draft: ReviewDraft,
        /// 交接文件写入成功时的路径
        saved_to: Option<PathBuf>,
    },
    LiteratureReviewEntered,
    SectionPlan(Vec<ReviewSection>),
    LiteratureAdded {
        section: usize,
        added: Vec<LiteratureEntry>,
        total: usize,
    },
    SectionReview { section: usize, draft: ReviewDraft },
    FullReview(ReviewDraft),
}

/// 一次向导会话
pub struct Wizard {
    context: WizardContext,
    state: WizardState,
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Wizard {
    /// 从第 1 步开始的新会话
    pub fn new(context: WizardContext) -> Self {
        Self {
            context,
            state: WizardState::new(),
        }
    }

    /// 以已有的研究目的直接进入文献探讨阶段
    pub fn resume_literature_review(
        context: WizardContext,
        purpose: impl Into<String>,
    ) -> Result<Self, WizardError> {
        Ok(Self {
            context,
            state: WizardState::resumed(purpose)?,
        })
    }

    /// 以交接文件中的研究目的进入文献探讨阶段
    pub fn resume_from_store(context: WizardContext) -> Result<Self, WizardError> {
        let purpose = context.purpose_store.load();
        Self::resume_literature_review(context, purpose)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    pub fn advance_to(&mut self, step: WizardStep) -> Result<(), WizardError> {
        self.state.advance_to(step)
    }

    pub fn record(&mut self, update: StateUpdate) -> Result<(), WizardError> {
        self.state.record(update)
    }

    /// 导出已生成的文档
    pub fn export_documents(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.context.document_outlet.save(&self.state)
    }

    /// 执行一个操作；失败时状态保持不变
    pub async fn dispatch(&mut self, action: WizardAction) -> Result<ActionOutcome, WizardError> {
        tracing::debug!(step = %self.state.step(), ?action, "dispatching wizard action");

        match action {
            WizardAction::GenerateKeywords { topic, content } => {
                let stage = KeywordExtraction::new(topic, content);
                let keywords = stage.execute(&self.context, &self.state).await?;

                self.state.record(StateUpdate::Topic {
                    topic: stage.topic,
                    content: stage.content,
                })?;
                self.state.record(StateUpdate::Keywords(keywords.clone()))?;
                self.state.advance_at_least(WizardStep::Keywords);
                Ok(ActionOutcome::Keywords(keywords))
            }
            WizardAction::SelectKeywords(selected) => {
                if self.state.keywords().is_empty() {
                    return Err(WizardError::MissingPrerequisite("產生的關鍵詞".to_string()));
                }
                if selected.is_empty() {
                    return Err(WizardError::InvalidSelection("至少需選擇一個關鍵詞".to_string()));
                }

                self.state.record(StateUpdate::SelectedKeywords(selected))?;
                self.state.advance_at_least(WizardStep::Literature);

                let query = search::derive_search_query(self.state.selected_keywords());
                let url = match search::scispace_search_url(&query) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        eprintln!("⚠️ 無法產生搜尋連結: {}", e);
                        None
                    }
                };
                Ok(ActionOutcome::SearchQuery { query, url })
            }
            WizardAction::GenerateTitles { literature_summary } => {
                let stage = TitleGeneration::new(literature_summary);
                let candidates = stage.execute(&self.context, &self.state).await?;

                self.state
                    .record(StateUpdate::LiteratureSummary(stage.literature_summary))?;
                self.state
                    .record(StateUpdate::TitleCandidates(candidates.clone()))?;
                self.state.advance_at_least(WizardStep::Titles);
                Ok(ActionOutcome::TitleCandidates(candidates))
            }
            WizardAction::SelectTitle(index) => {
                self.state.record(StateUpdate::SelectedTitle(index))?;
                self.state.advance_at_least(WizardStep::Purpose);

                let title = self.state.selected_title().cloned().unwrap_or_default();
                Ok(ActionOutcome::TitleSelected(title))
            }
            WizardAction::GeneratePurpose => {
                let draft = PurposeGeneration.execute(&self.context, &self.state).await?;

                self.state.record(StateUpdate::Purpose {
                    purpose: draft.content.clone(),
                    references: draft.references.clone(),
                })?;

                // 交接文件写入失败只提示，不影响本次会话
                let store = &self.context.purpose_store;
                let saved_to = match store.save(&draft.content) {
                    Ok(()) => Some(store.path().to_path_buf()),
                    Err(e) => {
                        eprintln!("⚠️ 研究目的暫存失敗: {:#}", e);
                        None
                    }
                };
                Ok(ActionOutcome::Purpose { draft, saved_to })
            }
            WizardAction::EnterLiteratureReview => {
                self.state.advance_to(WizardStep::LiteratureReview)?;
                Ok(ActionOutcome::LiteratureReviewEntered)
            }
            WizardAction::PlanSections => {
                self.require_literature_review()?;
                let sections = SectionPlanning.execute(&self.context, &self.state).await?;

                self.state.record(StateUpdate::SectionPlan(sections.clone()))?;
                Ok(ActionOutcome::SectionPlan(sections))
            }
            WizardAction::AnalyzeLiterature { section, text } => {
                self.require_literature_review()?;
                self.require_section(section)?;
                let entries = LiteratureAnalysis::new(section, text)
                    .execute(&self.context, &self.state)
                    .await?;
                self.collect_literature(section, entries)
            }
            WizardAction::AddLiterature {
                section,
                citation,
                summary,
            } => {
                self.require_literature_review()?;
                self.require_section(section)?;
                if citation.trim().is_empty() {
                    return Err(WizardError::MissingPrerequisite("文獻引用".to_string()));
                }
                let entry = LiteratureEntry::manual(citation.trim(), summary.trim());
                self.collect_literature(section, vec![entry])
            }
            WizardAction::GenerateSectionReview { section } => {
                self.require_literature_review()?;
                self.require_section(section)?;
                let draft = SectionReviewSynthesis::new(section)
                    .execute(&self.context, &self.state)
                    .await?;

                self.state.record(StateUpdate::SectionReview {
                    section,
                    draft: draft.clone(),
                })?;
                Ok(ActionOutcome::SectionReview { section, draft })
            }
            WizardAction::GenerateFullReview => {
                self.require_literature_review()?;
                let draft = FullReviewSynthesis
                    .execute(&self.context, &self.state)
                    .await?;

                self.state.record(StateUpdate::FullReview(draft.clone()))?;
                Ok(ActionOutcome::FullReview(draft))
            }
        }
    }

    fn require_literature_review(&self) -> Result<(), WizardError> {
        if self.state.step() != WizardStep::LiteratureReview {
            return Err(WizardError::NotInLiteratureReview(self.state.step()));
        }
        Ok(())
    }

    fn require_section(&self, section: usize) -> Result<(), WizardError> {
        if self.state.section(section).is_none() {
            return Err(WizardError::UnknownSection(section));
        }
        Ok(())
    }

    fn collect_literature(
        &mut self,
        section: usize,
        entries: Vec<LiteratureEntry>,
    ) -> Result<ActionOutcome, WizardError> {
        self.state.record(StateUpdate::Literature {
            section,
            entries: entries.clone(),
        })?;
        let total = self.state.literature_for(section)?.len();
        Ok(ActionOutcome::LiteratureAdded {
            section,
            added: entries,
            total,
        })
    }
}

#[cfg(test)]
mod tests;
