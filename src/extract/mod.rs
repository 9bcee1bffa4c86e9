//! 模型回应解析 - 从不保证格式正确的文本中恢复结构化内容

pub mod json;
pub mod markers;

pub use json::extract_json_object;
pub use markers::{
    BODY_MARKER_PURPOSE, BODY_MARKER_REVIEW, MarkerError, REFERENCES_MARKER, TITLES_MARKER,
    parse_keyword_lines, parse_title_candidates, split_body_and_references,
};
