use crate::types::research::{LiteratureEntry, ReviewSection};
use crate::wizard::WizardState;

/// 研究目的文档；没有研究目的时返回 None
pub fn render_purpose(state: &WizardState, generated_at: &str) -> Option<String> {
    let purpose = state.purpose()?;

    let mut doc = String::from("# 研究目的\n\n");
    doc.push_str(&format!("> 生成時間：{}\n\n", generated_at));

    if let Some(title) = state.selected_title() {
        doc.push_str("## 研究題目\n\n");
        if !title.r#type.is_empty() {
            doc.push_str(&format!("**{}**\n\n", title.r#type));
        }
        doc.push_str(&format!("{}\n\n", title.title));
        if !title.description.is_empty() {
            doc.push_str(&format!("{}\n\n", title.description));
        }
    }

    doc.push_str("## 研究目的\n\n");
    doc.push_str(purpose.trim());
    doc.push_str("\n\n");

    if let Some(references) = state.references().filter(|r| !r.trim().is_empty()) {
        doc.push_str("## 參考文獻\n\n");
        doc.push_str(references.trim());
        doc.push('\n');
    }

    Some(doc)
}

/// 文献探讨文档；尚未规划章节也没有完整文献探讨时返回 None
pub fn render_literature_review(state: &WizardState, generated_at: &str) -> Option<String> {
    if state.sections().is_empty() && state.full_review().is_none() {
        return None;
    }

    let mut doc = String::from("# 文獻探討\n\n");
    doc.push_str(&format!("> 生成時間：{}\n\n", generated_at));

    for section in state.sections() {
        render_section(&mut doc, state, section);
    }

    if let Some(review) = state.full_review() {
        doc.push_str("## 完整文獻探討\n\n");
        doc.push_str(review.content.trim());
        doc.push_str("\n\n");
        if !review.references.trim().is_empty() {
            doc.push_str("## 參考文獻\n\n");
            doc.push_str(review.references.trim());
            doc.push('\n');
        }
    }

    Some(doc)
}

fn render_section(doc: &mut String, state: &WizardState, section: &ReviewSection) {
    doc.push_str(&format!("## {}. {}\n\n", section.order, section.display_title()));
    if !section.description.is_empty() {
        doc.push_str(&format!("{}\n\n", section.description));
    }

    for subtitle in &section.subtitles {
        doc.push_str(&format!("- {} / {}", subtitle.subtitle_zh, subtitle.subtitle_en));
        if !subtitle.content_focus.is_empty() {
            doc.push_str(&format!("：{}", subtitle.content_focus));
        }
        doc.push('\n');
    }
    if !section.subtitles.is_empty() {
        doc.push('\n');
    }

    if !section.search_queries.is_empty() {
        doc.push_str("### 搜尋語法\n\n");
        for query in &section.search_queries {
            doc.push_str(&format!("- {}：`{}`\n", query.focus, query.query));
        }
        doc.push('\n');
    }

    let entries = state.literature_for(section.order).unwrap_or_default();
    if !entries.is_empty() {
        doc.push_str("### 已收集文獻\n\n");
        for (i, entry) in entries.iter().enumerate() {
            render_entry(doc, i + 1, entry);
        }
    }

    if let Some(review) = state.section_review(section.order) {
        doc.push_str("### 本節文獻探討\n\n");
        doc.push_str(review.content.trim());
        doc.push_str("\n\n");
        if !review.references.trim().is_empty() {
            doc.push_str("#### 參考文獻\n\n");
            doc.push_str(review.references.trim());
            doc.push_str("\n\n");
        }
    }
}

fn render_entry(doc: &mut String, index: usize, entry: &LiteratureEntry) {
    doc.push_str(&format!("{}. {}\n", index, entry.citation));
    let fields = [
        ("摘要", &entry.summary),
        ("相關性", &entry.relevance),
        ("貢獻", &entry.contribution),
        ("引用建議", &entry.usage_suggestion),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            doc.push_str(&format!("   - {}：{}\n", label, value));
        }
    }
    doc.push('\n');
}
