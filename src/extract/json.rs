use serde_json::{Map, Value};

/// 从模型回应中提取 JSON 对象
///
/// 先尝试整段解析；失败时取第一个 `{` 到最后一个 `}` 之间的片段再解析一次。
/// 两次都失败返回 `None`，解析错误不会向上传递。
pub fn extract_json_object(content: &str) -> Option<Map<String, Value>> {
    let content = content.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(content) {
        return Some(map);
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if start >= end {
        return None;
    }

    match serde_json::from_str::<Value>(&content[start..=end]) {
        Ok(Value::Object(map)) => {
            tracing::debug!(start, end, "JSON recovered from embedded span");
            Some(map)
        }
        _ => None,
    }
}
