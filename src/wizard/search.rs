use anyhow::{Context, Result};
use reqwest::Url;

const SCISPACE_SEARCH: &str = "https://scispace.com/search";

/// 由选定关键词组成英文检索语句
///
/// 每个关键词取 ` / ` 之后的英文部分，没有分隔符时使用整个关键词。
pub fn derive_search_query(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|keyword| match keyword.split_once(" / ") {
            Some((_, english)) => english.trim(),
            None => keyword.trim(),
        })
        .filter(|term| !term.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// SciSpace 检索链接
pub fn scispace_search_url(query: &str) -> Result<String> {
    let url = Url::parse_with_params(SCISPACE_SEARCH, &[("q", query)])
        .context("Failed to build SciSpace search url")?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_search_query() {
        let keywords = vec![
            "設計思考 / Design Thinking".to_string(),
            "使用者經驗 / User Experience".to_string(),
        ];
        assert_eq!(derive_search_query(&keywords), "Design Thinking User Experience");
    }

    #[test]
    fn test_derive_search_query_without_separator() {
        let keywords = vec!["  Service Design ".to_string(), "互動設計 / ".to_string()];
        assert_eq!(derive_search_query(&keywords), "Service Design");
    }

    #[test]
    fn test_derive_search_query_empty() {
        assert_eq!(derive_search_query(&[]), "");
    }

    #[test]
    fn test_scispace_search_url() {
        let url = scispace_search_url("Design Thinking").unwrap();
        assert_eq!(url, "https://scispace.com/search?q=Design+Thinking");
    }
}
