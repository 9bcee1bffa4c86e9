use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::research::{
    LiteratureEntry, ReviewDraft, ReviewSection, TitleCandidate,
};
use crate::wizard::error::WizardError;

/// 向导步骤，数值沿用画面上的步骤编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    /// 研究主题与内容
    #[default]
    Topic = 1,
    /// 关键词选择
    Keywords = 2,
    /// 文献检索与文献摘要
    Literature = 3,
    /// 选择研究题目
    Titles = 6,
    /// 生成研究目的
    Purpose = 7,
    /// 文献探讨
    LiteratureReview = 8,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Topic => "研究主題界定",
            WizardStep::Keywords => "關鍵詞選擇",
            WizardStep::Literature => "文獻回顧彙整",
            WizardStep::Titles => "選擇研究題目",
            WizardStep::Purpose => "生成研究目的",
            WizardStep::LiteratureReview => "文獻探討階段",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "第{}步：{}", self.number(), self.label())
    }
}

/// 对向导状态的一次写入
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    Topic { topic: String, content: String },
    Keywords(Vec<String>),
    SelectedKeywords(Vec<String>),
    LiteratureSummary(String),
    TitleCandidates(Vec<TitleCandidate>),
    SelectedTitle(usize),
    Purpose { purpose: String, references: String },
    SectionPlan(Vec<ReviewSection>),
    Literature { section: usize, entries: Vec<LiteratureEntry> },
    SectionReview { section: usize, draft: ReviewDraft },
    FullReview(ReviewDraft),
}

/// 一次会话累积的全部数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    step: WizardStep,
    research_topic: String,
    research_content: String,
    keywords: Vec<String>,
    selected_keywords: Vec<String>,
    literature_summary: String,
    title_candidates: Vec<TitleCandidate>,
    selected_title: Option<TitleCandidate>,
    purpose: Option<String>,
    references: Option<String>,
    sections: Vec<ReviewSection>,
    collected_literature: BTreeMap<usize, Vec<LiteratureEntry>>,
    section_reviews: BTreeMap<usize, ReviewDraft>,
    full_review: Option<ReviewDraft>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从交接文件中的研究目的直接进入文献探讨阶段
    pub fn resumed(purpose: impl Into<String>) -> Result<Self, WizardError> {
        let purpose = purpose.into();
        if purpose.trim().is_empty() {
            return Err(WizardError::MissingPrerequisite("研究目的內容".to_string()));
        }
        Ok(Self {
            step: WizardStep::LiteratureReview,
            purpose: Some(purpose),
            ..Default::default()
        })
    }

    /// 前进到指定步骤，不允许回退，也不允许缺少该步骤的进入数据
    pub fn advance_to(&mut self, step: WizardStep) -> Result<(), WizardError> {
        if step < self.step {
            return Err(WizardError::StepRegression {
                from: self.step,
                to: step,
            });
        }
        self.check_entry(step)?;
        if step != self.step {
            tracing::info!(from = %self.step, to = %step, "wizard step advanced");
        }
        self.step = step;
        Ok(())
    }

    /// 进入某一步骤所需的数据
    fn check_entry(&self, step: WizardStep) -> Result<(), WizardError> {
        let missing = match step {
            WizardStep::Topic => None,
            WizardStep::Keywords if self.keywords.is_empty() => Some("產生的關鍵詞"),
            WizardStep::Literature if self.selected_keywords.is_empty() => Some("選定的關鍵詞"),
            WizardStep::Titles if self.title_candidates.is_empty() => Some("研究題目選項"),
            WizardStep::Purpose if self.selected_title.is_none() => Some("選定的研究題目"),
            WizardStep::LiteratureReview if self.purpose.is_none() => Some("研究目的內容"),
            _ => None,
        };
        match missing {
            Some(what) => Err(WizardError::MissingPrerequisite(what.to_string())),
            None => Ok(()),
        }
    }

    /// 至少前进到指定步骤；已经更靠后时保持不变
    pub(crate) fn advance_at_least(&mut self, step: WizardStep) {
        if step > self.step {
            tracing::info!(from = %self.step, to = %step, "wizard step advanced");
            self.step = step;
        }
    }

    /// 写入一项数据，写入前检查前置条件
    pub fn record(&mut self, update: StateUpdate) -> Result<(), WizardError> {
        match update {
            StateUpdate::Topic { topic, content } => {
                self.research_topic = topic;
                self.research_content = content;
            }
            StateUpdate::Keywords(keywords) => {
                // 重新生成后只保留仍然存在的已选关键词
                self.selected_keywords.retain(|k| keywords.contains(k));
                self.keywords = keywords;
            }
            StateUpdate::SelectedKeywords(selected) => {
                if let Some(unknown) = selected.iter().find(|k| !self.keywords.contains(k)) {
                    return Err(WizardError::InvalidSelection(format!(
                        "關鍵詞「{}」不在產生的清單中",
                        unknown
                    )));
                }
                let mut deduped: Vec<String> = Vec::with_capacity(selected.len());
                for keyword in selected {
                    if !deduped.contains(&keyword) {
                        deduped.push(keyword);
                    }
                }
                self.selected_keywords = deduped;
            }
            StateUpdate::LiteratureSummary(summary) => {
                self.literature_summary = summary;
            }
            StateUpdate::TitleCandidates(candidates) => {
                // 已选题目必须仍在新的候选中
                if self
                    .selected_title
                    .as_ref()
                    .is_some_and(|selected| !candidates.contains(selected))
                {
                    self.selected_title = None;
                }
                self.title_candidates = candidates;
            }
            StateUpdate::SelectedTitle(index) => {
                if self.title_candidates.is_empty() {
                    return Err(WizardError::MissingPrerequisite("研究題目選項".to_string()));
                }
                let title = self.title_candidates.get(index).cloned().ok_or_else(|| {
                    WizardError::InvalidSelection(format!(
                        "題目編號 {} 超出範圍（共 {} 個）",
                        index + 1,
                        self.title_candidates.len()
                    ))
                })?;
                self.selected_title = Some(title);
            }
            StateUpdate::Purpose {
                purpose,
                references,
            } => {
                if self.selected_title.is_none() {
                    return Err(WizardError::MissingPrerequisite("選定的研究題目".to_string()));
                }
                self.purpose = Some(purpose);
                self.references = Some(references);
            }
            StateUpdate::SectionPlan(sections) => {
                if self.purpose.is_none() {
                    return Err(WizardError::MissingPrerequisite("研究目的內容".to_string()));
                }
                self.collected_literature = sections
                    .iter()
                    .map(|section| (section.order, Vec::new()))
                    .collect();
                self.section_reviews.clear();
                self.full_review = None;
                self.sections = sections;
            }
            StateUpdate::Literature { section, entries } => {
                let collected = self
                    .collected_literature
                    .get_mut(&section)
                    .ok_or(WizardError::UnknownSection(section))?;
                collected.extend(entries);
            }
            StateUpdate::SectionReview { section, draft } => {
                if self.literature_for(section)?.is_empty() {
                    return Err(WizardError::MissingPrerequisite(format!(
                        "第 {} 節尚未收集任何文獻",
                        section
                    )));
                }
                self.section_reviews.insert(section, draft);
            }
            StateUpdate::FullReview(draft) => {
                if !self.has_collected_literature() {
                    return Err(WizardError::MissingPrerequisite("任何章節的文獻".to_string()));
                }
                self.references = Some(draft.references.clone());
                self.full_review = Some(draft);
            }
        }
        Ok(())
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn research_topic(&self) -> &str {
        &self.research_topic
    }

    pub fn research_content(&self) -> &str {
        &self.research_content
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn selected_keywords(&self) -> &[String] {
        &self.selected_keywords
    }

    pub fn literature_summary(&self) -> &str {
        &self.literature_summary
    }

    pub fn title_candidates(&self) -> &[TitleCandidate] {
        &self.title_candidates
    }

    pub fn selected_title(&self) -> Option<&TitleCandidate> {
        self.selected_title.as_ref()
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }

    pub fn references(&self) -> Option<&str> {
        self.references.as_deref()
    }

    pub fn sections(&self) -> &[ReviewSection] {
        &self.sections
    }

    pub fn section(&self, order: usize) -> Option<&ReviewSection> {
        self.sections.iter().find(|section| section.order == order)
    }

    pub fn collected_literature(&self) -> &BTreeMap<usize, Vec<LiteratureEntry>> {
        &self.collected_literature
    }

    /// 指定章节已收集的文献
    pub fn literature_for(&self, section: usize) -> Result<&[LiteratureEntry], WizardError> {
        self.collected_literature
            .get(&section)
            .map(Vec::as_slice)
            .ok_or(WizardError::UnknownSection(section))
    }

    pub fn has_collected_literature(&self) -> bool {
        self.collected_literature.values().any(|entries| !entries.is_empty())
    }

    pub fn section_review(&self, section: usize) -> Option<&ReviewDraft> {
        self.section_reviews.get(&section)
    }

    pub fn section_reviews(&self) -> &BTreeMap<usize, ReviewDraft> {
        &self.section_reviews
    }

    pub fn full_review(&self) -> Option<&ReviewDraft> {
        self.full_review.as_ref()
    }
}
