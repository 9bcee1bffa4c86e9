use serde::{Deserialize, Serialize};

/// 研究题目候选
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCandidate {
    /// 题目类型，例如“1. 理論導向：”
    #[serde(rename = "type")]
    pub r#type: String,
    /// 中英对照题目
    pub title: String,
    /// 括号内的说明
    pub description: String,
}

/// 文献探讨章节中的小标题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    #[serde(default)]
    pub subtitle_zh: String,
    #[serde(default)]
    pub subtitle_en: String,
    #[serde(default)]
    pub content_focus: String,
}

/// 建议的检索语句
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "description")]
    pub focus: String,
    pub query: String,
}

/// 文献探讨架构中的一个章节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSection {
    /// 章节序号，从 1 开始，同时作为章节标识
    pub order: usize,
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(default)]
    pub search_queries: Vec<SearchQuery>,
}

impl ReviewSection {
    /// 章节标题，带英文标题时附在后面
    pub fn display_title(&self) -> String {
        if self.title_en.is_empty() {
            self.title.clone()
        } else {
            format!("{} / {}", self.title, self.title_en)
        }
    }
}

/// 收集到的一篇文献
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureEntry {
    /// APA 引用格式
    pub citation: String,
    /// 摘要
    #[serde(rename = "abstract", alias = "summary")]
    pub summary: String,
    #[serde(default)]
    pub relevance: String,
    #[serde(default)]
    pub contribution: String,
    #[serde(default)]
    pub usage_suggestion: String,
}

impl LiteratureEntry {
    /// 手动录入的文献，只有引用与摘要
    pub fn manual(citation: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            citation: citation.into(),
            summary: summary.into(),
            ..Default::default()
        }
    }
}

/// 一段生成的论述及其参考文献
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub content: String,
    pub references: String,
}
