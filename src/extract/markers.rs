use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::types::research::TitleCandidate;

/// 研究题目回应的起始标记
pub const TITLES_MARKER: &str = "===建議研究題目===";
/// 研究目的正文标记
pub const BODY_MARKER_PURPOSE: &str = "===研究目的===";
/// 文献探讨正文标记
pub const BODY_MARKER_REVIEW: &str = "===文獻探討===";
/// 参考文献段落标记
pub const REFERENCES_MARKER: &str = "===參考文獻===";

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*[.．、]").expect("numbered line pattern is valid"));

/// 标记解析失败的原因
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    #[error("回應中找不到標記「{0}」")]
    MarkerMissing(&'static str),

    #[error("標記「{0}」之前沒有任何內容")]
    EmptyBody(&'static str),

    #[error("回應中沒有可用的{0}")]
    NothingFound(&'static str),
}

/// 按参考文献标记切分正文和参考文献
///
/// 正文去掉 `body_marker` 后修剪空白。缺少参考文献标记或正文为空都视为失败。
pub fn split_body_and_references(
    content: &str,
    body_marker: &'static str,
) -> Result<(String, String), MarkerError> {
    let (body, references) = content
        .split_once(REFERENCES_MARKER)
        .ok_or(MarkerError::MarkerMissing(REFERENCES_MARKER))?;

    let body = body.replace(body_marker, "").trim().to_string();
    if body.is_empty() {
        return Err(MarkerError::EmptyBody(REFERENCES_MARKER));
    }

    Ok((body, references.trim().to_string()))
}

/// 解析研究题目候选
pub fn parse_title_candidates(content: &str) -> Result<Vec<TitleCandidate>, MarkerError> {
    let (_, titles_content) = content
        .split_once(TITLES_MARKER)
        .ok_or(MarkerError::MarkerMissing(TITLES_MARKER))?;

    let mut titles = Vec::new();
    let mut current = TitleCandidate::default();

    for line in titles_content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if NUMBERED_LINE.is_match(line) {
            if !current.title.is_empty() {
                titles.push(std::mem::take(&mut current));
            }
            current.r#type = line.to_string();
        } else if line.starts_with('（') {
            current.description = line.to_string();
        } else if line.contains('/') && current.title.is_empty() {
            current.title = line.to_string();
        }
    }

    if !current.title.is_empty() {
        titles.push(current);
    }

    if titles.is_empty() {
        return Err(MarkerError::NothingFound("研究題目"));
    }
    Ok(titles)
}

/// 按行解析关键词，忽略空行
pub fn parse_keyword_lines(content: &str) -> Result<Vec<String>, MarkerError> {
    let keywords: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(MarkerError::NothingFound("關鍵詞"));
    }
    Ok(keywords)
}
