//! 各向导步骤对应的模型调用阶段

mod keywords;
mod literature_analysis;
mod purpose;
mod review;
mod section_plan;
mod titles;

pub use keywords::KeywordExtraction;
pub use literature_analysis::LiteratureAnalysis;
pub use purpose::PurposeGeneration;
pub use review::{FullReviewSynthesis, SectionReviewSynthesis};
pub use section_plan::SectionPlanning;
pub use titles::TitleGeneration;

use serde::de::DeserializeOwned;

use crate::extract::extract_json_object;
use crate::wizard::error::{ExternalCallResult, StageError};

/// 从回应中取出 JSON 对象里指定键的非空数组并反序列化
pub(crate) fn decode_json_list<T: DeserializeOwned>(
    raw: &str,
    key: &str,
) -> ExternalCallResult<Vec<T>> {
    let object = extract_json_object(raw)
        .ok_or_else(|| StageError::malformed("回應中找不到 JSON 物件", raw))?;

    let value = object
        .get(key)
        .cloned()
        .ok_or_else(|| StageError::malformed(format!("JSON 缺少「{}」欄位", key), raw))?;

    let items: Vec<T> = serde_json::from_value(value)
        .map_err(|e| StageError::malformed(format!("「{}」欄位格式錯誤: {}", key, e), raw))?;

    if items.is_empty() {
        return Err(StageError::malformed(format!("「{}」欄位是空的", key), raw));
    }
    Ok(items)
}
