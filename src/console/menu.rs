use crate::wizard::{WizardState, WizardStep};

/// 菜单上可以选择的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    GenerateKeywords,
    SelectKeywords,
    GenerateTitles,
    SelectTitle,
    GeneratePurpose,
    EnterLiteratureReview,
    PlanSections,
    AnalyzeLiterature,
    AddLiterature,
    GenerateSectionReview,
    GenerateFullReview,
    ShowProgress,
    Export,
    Quit,
}

impl MenuCommand {
    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::GenerateKeywords => "輸入研究主題與內容，產生關鍵詞",
            MenuCommand::SelectKeywords => "選擇關鍵詞並產生搜尋語法",
            MenuCommand::GenerateTitles => "貼上文獻摘要，產生研究題目",
            MenuCommand::SelectTitle => "選擇研究題目",
            MenuCommand::GeneratePurpose => "產生研究目的與參考文獻",
            MenuCommand::EnterLiteratureReview => "進入文獻探討階段",
            MenuCommand::PlanSections => "規劃文獻探討架構",
            MenuCommand::AnalyzeLiterature => "貼上多篇文獻，由模型分析整理",
            MenuCommand::AddLiterature => "手動新增一篇文獻",
            MenuCommand::GenerateSectionReview => "產生單一章節的文獻探討",
            MenuCommand::GenerateFullReview => "產生完整文獻探討",
            MenuCommand::ShowProgress => "檢視目前進度",
            MenuCommand::Export => "匯出 Markdown 文件",
            MenuCommand::Quit => "結束",
        }
    }
}

/// 按当前状态列出可用的命令
pub fn menu_for(state: &WizardState) -> Vec<MenuCommand> {
    let mut commands = Vec::new();

    if state.step() < WizardStep::LiteratureReview {
        commands.push(MenuCommand::GenerateKeywords);
        if !state.keywords().is_empty() {
            commands.push(MenuCommand::SelectKeywords);
        }
        if !state.selected_keywords().is_empty() {
            commands.push(MenuCommand::GenerateTitles);
        }
        if !state.title_candidates().is_empty() {
            commands.push(MenuCommand::SelectTitle);
        }
        if state.selected_title().is_some() {
            commands.push(MenuCommand::GeneratePurpose);
        }
        if state.purpose().is_some() {
            commands.push(MenuCommand::EnterLiteratureReview);
        }
    } else {
        commands.push(MenuCommand::PlanSections);
        if !state.sections().is_empty() {
            commands.push(MenuCommand::AnalyzeLiterature);
            commands.push(MenuCommand::AddLiterature);
        }
        if state.has_collected_literature() {
            commands.push(MenuCommand::GenerateSectionReview);
            commands.push(MenuCommand::GenerateFullReview);
        }
    }

    commands.push(MenuCommand::ShowProgress);
    commands.push(MenuCommand::Export);
    commands.push(MenuCommand::Quit);
    commands
}

/// 进度摘要
pub fn progress_summary(state: &WizardState) -> String {
    let mut lines = vec![format!("📍 目前位置：{}", state.step())];

    if !state.research_topic().is_empty() {
        lines.push(format!("   研究主題：{}", state.research_topic()));
    }
    if !state.keywords().is_empty() {
        lines.push(format!(
            "   關鍵詞：{} 個，已選 {} 個",
            state.keywords().len(),
            state.selected_keywords().len()
        ));
    }
    if !state.title_candidates().is_empty() {
        lines.push(format!("   題目選項：{} 個", state.title_candidates().len()));
    }
    if let Some(title) = state.selected_title() {
        lines.push(format!("   選定題目：{}", title.title));
    }
    if let Some(purpose) = state.purpose() {
        lines.push(format!("   研究目的：{} 字", purpose.chars().count()));
    }
    for section in state.sections() {
        let collected = state
            .literature_for(section.order)
            .map(|entries| entries.len())
            .unwrap_or(0);
        let reviewed = if state.section_review(section.order).is_some() {
            "，已撰寫"
        } else {
            ""
        };
        lines.push(format!(
            "   {}. {}：{} 篇文獻{}",
            section.order,
            section.display_title(),
            collected,
            reviewed
        ));
    }
    if state.full_review().is_some() {
        lines.push("   完整文獻探討：已產生".to_string());
    }

    lines.join("\n")
}
