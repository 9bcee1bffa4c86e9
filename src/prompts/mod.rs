//! Prompt构建器 - 按阶段从向导状态组装系统提示词与用户提示词
//!
//! 这里的函数都是纯函数：不做 I/O，不修改状态，字段按原样插入模板。

use std::collections::BTreeMap;

use serde_json::json;

use crate::extract::{BODY_MARKER_PURPOSE, BODY_MARKER_REVIEW, REFERENCES_MARKER, TITLES_MARKER};
use crate::types::research::{LiteratureEntry, ReviewSection, TitleCandidate};

pub mod terminology;

use terminology::{APA_CITATION, PUNCTUATION, TAIWAN_USAGE};

/// 一次模型调用的提示词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// 关键词提取
pub fn keywords(topic: &str, content: &str) -> PromptPair {
    let system = r#"你是一個專業的設計研究助手，專門負責從研究主題和內容中提取核心關鍵字。

規則：
1. 只回傳關鍵字清單，每行一個關鍵字
2. 每個關鍵字必須包含中英文對照，使用 / 分隔
3. 不要包含任何其他說明文字或標點符號
4. 英文關鍵字使用學術資料庫常見的用詞
5. 每個關鍵字的格式必須是：中文關鍵字 / English Keyword
6. 總數限制在 5-7 個最重要的關鍵字

範例格式：
設計思考 / Design Thinking
使用者經驗 / User Experience
介面設計 / Interface Design"#;

    let user = format!(
        "請從以下研究主題和內容中提取最核心的關鍵字（中英對照）：\n\n研究主題：{}\n\n研究內容：{}",
        topic, content
    );
    PromptPair::new(system, user)
}

/// 研究题目生成
pub fn titles(topic: &str, content: &str, literature_summary: &str) -> PromptPair {
    let system = format!(
        "你是一位深耕於設計研究領域的專業學術研究者，擅長整合設計理論與實務。{}\n\n4. {}\n\n5. 研究題目命名原則：\n   - 清楚表達研究主題\n   - 點出研究方法或途徑\n   - 說明研究對象或範圍\n   - 展現研究的創新性",
        TAIWAN_USAGE, PUNCTUATION
    );

    let user = format!(
        r#"請根據以下所有資訊，生成三個符合學術規範的研究題目選項，確保題目緊密連結研究主題與內容：

研究主題：
{topic}

研究內容：
{content}

文獻資料：
{literature_summary}

【題目類型要求】
A. 理論導向題目：基於文獻中的理論框架，反映文獻中的理論缺口
B. 實務導向題目：針對實際設計問題，強調解決方案的開發
C. 整合導向題目：結合理論與實務觀點，展現研究的獨特性

【題目格式規範】
- 清晰準確的用詞，適當的研究範圍界定
- 中英文對照，點出研究方法或取向

請依照以下格式回覆：

{TITLES_MARKER}
1. 理論導向：
[中文題目] / [English Title]
（基於文獻分析，聚焦於[具體理論框架]的研究）

2. 實務導向：
[中文題目] / [English Title]
（針對[具體實務問題]，提出解決方案）

3. 整合導向：
[中文題目] / [English Title]
（結合[理論基礎]與[實務應用]的創新研究）"#
    );
    PromptPair::new(system, user)
}

/// 研究目的与参考文献生成
pub fn purpose(
    topic: &str,
    content: &str,
    literature_summary: &str,
    title: &TitleCandidate,
) -> PromptPair {
    let system = format!(
        r#"你是一位經驗豐富的設計研究學者，擅長整合設計理論與實務。{TAIWAN_USAGE}

4. APA 參考文獻格式：
   - 中文文獻：作者（年代）。文章標題。期刊名稱，卷（期），頁碼。
   - 英文文獻：Author, A. A. (Year). Title. Journal Name, Volume(Issue), pages.
   - 中文作者姓名完整列出，英文作者姓氏加名字縮寫"#
    );

    let user = format!(
        r#"請根據以下所有資訊，以自然且專業的學術論述方式，生成一份完整的研究目的和參考文獻：

研究主題：{topic}

研究內容：{content}

文獻摘要：{literature_summary}

選定標題：{title}
題目類型：{kind}
題目說明：{description}

【研究目的撰寫要求】（至少1000字）
1. 以專業設計學術研究者的視角，運用第一人稱敘述
2. 從設計領域的理論缺口或實務問題切入，說明研究動機和重要性
3. 具體描述研究目標和方法，闡述預期的理論與實務貢獻
4. 以連貫且完整的方式呈現（不分小標題），段落之間邏輯流暢
5. {APA_CITATION}

【參考文獻要求】
- 嚴格遵循 APA 第七版格式，中文文獻在前，英文文獻在後
- 只列出在內文中實際引用過的文獻

請以以下格式回覆：

{BODY_MARKER_PURPOSE}
[至少1000字完整研究目的論述]

{REFERENCES_MARKER}
[APA格式參考文獻列表]"#,
        title = title.title,
        kind = title.r#type,
        description = title.description,
    );
    PromptPair::new(system, user)
}

/// 文献探讨架构规划
pub fn section_plan(research_purpose: &str) -> PromptPair {
    let system = format!(
        r#"你是一位專業的設計研究方法專家，擅長規劃文獻探討架構。{TAIWAN_USAGE}

4. 章節規劃原則：
   - 確保章節涵蓋研究目的的所有重要面向
   - 由基礎理論到應用實務循序漸進
   - 各章節之間要有邏輯連貫性
   - 每個章節 3-4 個小標題

The response must strictly follow this JSON format with no additional text:
{{
    "sections": [
        {{
            "title_zh": "中文章節標題",
            "title_en": "English Section Title",
            "description": "本章節應該探討的重點",
            "subtitles": [
                {{
                    "subtitle_zh": "中文小標題",
                    "subtitle_en": "English Subtitle",
                    "content_focus": "此小節應該探討的具體內容重點"
                }}
            ],
            "search_queries": [
                {{
                    "focus": "搜尋重點描述",
                    "query": "A complete English sentence for academic database search"
                }}
            ]
        }}
    ]
}}"#
    );

    let user = format!(
        r#"Based on the following research purpose, please provide a literature review structure of 3-5 sections:
- Each section must directly support aspects of the research purpose
- Sections should progress logically from theoretical to practical
- For each section give Chinese and English titles, 3-4 subtitles, a description of key points,
  and 2-3 search queries written as complete English sentences usable in academic databases

Research Purpose:
{research_purpose}

Please strictly follow the JSON format specified in the system message, with no additional explanation."#
    );
    PromptPair::new(system, user)
}

/// 多篇文献分析
pub fn literature_analysis(section_title: &str, literature_text: &str) -> PromptPair {
    let system = r#"您是一位專業的文獻分析專家，請協助分析輸入的多篇文獻內容。
請使用台灣繁體中文的用字習慣撰寫分析內容，使用台灣的學術用語和「」引號。
從輸入的文字中識別出每篇文獻的 APA 引用格式和摘要內容，並進行分析整理。
每篇文獻之間是用連續兩個換行符號分隔。"#;

    let user = format!(
        r#"請分析以下多篇文獻內容，並按照以下方式整理每一篇：
1. 識別並擷取每篇文獻的 APA 引用格式
2. 擷取每篇文獻的摘要內容
3. 分析每篇文獻與「{section_title}」章節的相關性
4. 提供每篇文獻對該章節的主要貢獻
5. 建議在文獻回顧中如何引用每篇文獻

輸入內容：
{literature_text}

請使用以下 JSON 格式回覆，包含所有文獻的分析結果：
{{
    "literature": [
        {{
            "citation": "APA引用格式",
            "abstract": "摘要內容",
            "relevance": "與章節的相關性分析",
            "contribution": "對章節的主要貢獻",
            "usage_suggestion": "在文獻回顧中的引用建議"
        }}
    ]
}}"#
    );
    PromptPair::new(system, user)
}

/// 单一章节的文献探讨
pub fn section_review(section_title: &str, entries: &[LiteratureEntry]) -> PromptPair {
    let system = format!(
        "你是一位深耕於設計研究領域的專業學術研究者，擅長整合設計理論與實務。{}\n\n4. {}\n\n5. {}",
        TAIWAN_USAGE, PUNCTUATION, APA_CITATION
    );

    let literature_data: Vec<_> = entries
        .iter()
        .map(|entry| {
            json!({
                "citation": entry.citation,
                "content": entry.summary,
                "relevance": entry.relevance,
                "contribution": entry.contribution,
            })
        })
        .collect();
    let literature_json = serde_json::to_string_pretty(&literature_data).unwrap_or_default();

    let user = format!(
        r#"請根據以下文獻資料，撰寫「{section_title}」章節的文獻探討內容。

文獻資料：
{literature_json}

【寫作要求】
1. 本章節文字至少 1200 字，每個論點都要有充分的文獻支持
2. 比較不同研究的方法與發現，整合相似觀點，對比相異觀點
3. 由淺入深，循序漸進地展開論述，段落之間邏輯流暢
4. 指出文獻中的理論缺口與未來研究方向

回覆格式：
{BODY_MARKER_REVIEW}
[1200字以上的文獻探討內容]

{REFERENCES_MARKER}
[APA格式參考文獻列表]"#
    );
    PromptPair::new(system, user)
}

/// 全部章节合并的完整文献探讨
pub fn full_review(
    title: Option<&TitleCandidate>,
    research_purpose: &str,
    sections: &[ReviewSection],
    collected: &BTreeMap<usize, Vec<LiteratureEntry>>,
) -> PromptPair {
    let system = "你是一位專業的學術研究者，擅長撰寫文獻探討。";

    let section_data: Vec<_> = sections
        .iter()
        .map(|section| {
            json!({
                "order": section.order,
                "title": section.display_title(),
                "description": section.description,
                "literature": collected.get(&section.order).cloned().unwrap_or_default(),
            })
        })
        .collect();
    let section_json = serde_json::to_string_pretty(&section_data).unwrap_or_default();

    let title_text = title.map(|t| t.title.as_str()).unwrap_or("（未指定）");

    let user = format!(
        r#"請根據以下資料，撰寫一份完整的文獻探討（至少 3500 字）：

研究題目：
{title_text}

研究目的：
{research_purpose}

各節文獻資料：
{section_json}

要求：
1. 總字數至少 3500 字
2. 依照各節規劃的主題分段撰寫
3. 每段都要適當引用並整合相關文獻
4. 段落之間要有適當的轉折
5. 最後要列出完整的參考文獻（APA格式）

請依照以下格式回覆：

{BODY_MARKER_REVIEW}
[3500字以上的文獻探討內容]

{REFERENCES_MARKER}
[APA格式的參考文獻列表]"#
    );
    PromptPair::new(system, user)
}
