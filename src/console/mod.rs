//! 终端交互：把菜单选择映射为向导操作并输出结果

use anyhow::Result;
use inquire::InquireError;
use std::io::Write;

use crate::wizard::{ActionOutcome, Wizard, WizardAction, WizardError, WizardState};

pub mod menu;
pub mod prompt;

use menu::{MenuCommand, menu_for, progress_summary};
pub use prompt::{InquirePrompter, Prompter};

/// 收集输入时提前离开的原因
enum Halt {
    /// ESC：回到菜单
    Back,
    /// Ctrl-C：结束会话
    Quit,
    Failed(anyhow::Error),
}

impl From<InquireError> for Halt {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled => Halt::Back,
            InquireError::OperationInterrupted => Halt::Quit,
            other => Halt::Failed(other.into()),
        }
    }
}

/// 终端会话
pub struct Console<P, W> {
    prompter: P,
    output: W,
}

impl<P: Prompter, W: Write> Console<P, W> {
    pub fn new(prompter: P, output: W) -> Self {
        Self { prompter, output }
    }

    /// 运行菜单循环，直到选择结束、在菜单按 ESC 或 Ctrl-C
    pub async fn run(&mut self, wizard: &mut Wizard) -> Result<()> {
        writeln!(self.output, "📚 研究寫作助手")?;

        loop {
            let commands = menu_for(wizard.state());
            let labels: Vec<String> = commands
                .iter()
                .map(|command| command.label().to_string())
                .collect();

            let message = wizard.step().to_string();
            let command = match self.prompter.select(&message, &labels) {
                Ok(index) => match commands.get(index) {
                    Some(command) => *command,
                    None => continue,
                },
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e.into()),
            };

            if !self.run_command(wizard, command).await? {
                break;
            }
        }

        writeln!(self.output, "👋 再見")?;
        Ok(())
    }

    /// 执行一个命令；需要结束会话时返回 false
    async fn run_command(&mut self, wizard: &mut Wizard, command: MenuCommand) -> Result<bool> {
        match command {
            MenuCommand::Quit => return Ok(false),
            MenuCommand::ShowProgress => {
                writeln!(self.output, "{}", progress_summary(wizard.state()))?;
                return Ok(true);
            }
            MenuCommand::Export => {
                match wizard.export_documents() {
                    Ok(paths) if paths.is_empty() => {
                        writeln!(self.output, "⚠️ 目前沒有可以匯出的內容")?
                    }
                    Ok(paths) => {
                        for path in paths {
                            writeln!(self.output, "💾 {}", path.display())?;
                        }
                    }
                    Err(e) => writeln!(self.output, "❌ 匯出失敗: {:#}", e)?,
                }
                return Ok(true);
            }
            _ => {}
        }

        let action = match self.collect_action(wizard.state(), command) {
            Ok(action) => action,
            Err(Halt::Back) => {
                writeln!(self.output, "↩️ 已返回選單")?;
                return Ok(true);
            }
            Err(Halt::Quit) => return Ok(false),
            Err(Halt::Failed(e)) => return Err(e),
        };

        match wizard.dispatch(action).await {
            Ok(outcome) => self.print_outcome(&outcome)?,
            Err(e) => self.print_error(&e)?,
        }
        Ok(true)
    }

    /// 读取命令所需的输入
    fn collect_action(
        &mut self,
        state: &WizardState,
        command: MenuCommand,
    ) -> Result<WizardAction, Halt> {
        let action = match command {
            MenuCommand::GenerateKeywords => {
                let topic = self.prompter.text("研究主題")?;
                let content = self.prompter.editor("研究內容")?;
                WizardAction::GenerateKeywords { topic, content }
            }
            MenuCommand::SelectKeywords => {
                let keywords = state.keywords();
                let indices = self.prompter.multi_select("選擇關鍵詞", keywords)?;
                WizardAction::SelectKeywords(
                    indices
                        .into_iter()
                        .filter_map(|i| keywords.get(i).cloned())
                        .collect(),
                )
            }
            MenuCommand::GenerateTitles => {
                let literature_summary = self.prompter.editor("文獻摘要")?;
                WizardAction::GenerateTitles { literature_summary }
            }
            MenuCommand::SelectTitle => {
                let options: Vec<String> = state
                    .title_candidates()
                    .iter()
                    .map(|title| format!("{} {}", title.r#type, title.title))
                    .collect();
                WizardAction::SelectTitle(self.prompter.select("選擇研究題目", &options)?)
            }
            MenuCommand::GeneratePurpose => WizardAction::GeneratePurpose,
            MenuCommand::EnterLiteratureReview => WizardAction::EnterLiteratureReview,
            MenuCommand::PlanSections => WizardAction::PlanSections,
            MenuCommand::AnalyzeLiterature => {
                let section = self.select_section(state)?;
                let text = self.prompter.editor("文獻內容（每篇之間空一行）")?;
                WizardAction::AnalyzeLiterature { section, text }
            }
            MenuCommand::AddLiterature => {
                let section = self.select_section(state)?;
                let citation = self.prompter.text("APA 引用格式")?;
                let summary = self.prompter.editor("摘要")?;
                WizardAction::AddLiterature {
                    section,
                    citation,
                    summary,
                }
            }
            MenuCommand::GenerateSectionReview => WizardAction::GenerateSectionReview {
                section: self.select_section(state)?,
            },
            MenuCommand::GenerateFullReview => WizardAction::GenerateFullReview,
            // 不需要输入的命令在 run_command 中处理
            MenuCommand::ShowProgress | MenuCommand::Export | MenuCommand::Quit => {
                return Err(Halt::Back);
            }
        };
        Ok(action)
    }

    /// 选择章节，返回章节序号
    fn select_section(&mut self, state: &WizardState) -> Result<usize, Halt> {
        let sections = state.sections();
        let options: Vec<String> = sections
            .iter()
            .map(|section| format!("{}. {}", section.order, section.display_title()))
            .collect();
        let index = self.prompter.select("選擇章節", &options)?;
        sections
            .get(index)
            .map(|section| section.order)
            .ok_or(Halt::Back)
    }

    fn print_outcome(&mut self, outcome: &ActionOutcome) -> Result<()> {
        match outcome {
            ActionOutcome::Keywords(keywords) => {
                writeln!(self.output, "🔑 關鍵詞：")?;
                for (i, keyword) in keywords.iter().enumerate() {
                    writeln!(self.output, "  {}. {}", i + 1, keyword)?;
                }
            }
            ActionOutcome::SearchQuery { query, url } => {
                writeln!(self.output, "🔍 搜尋語法：{}", query)?;
                if let Some(url) = url {
                    writeln!(self.output, "🔗 SciSpace：{}", url)?;
                }
            }
            ActionOutcome::TitleCandidates(titles) => {
                writeln!(self.output, "📝 建議研究題目：")?;
                for (i, title) in titles.iter().enumerate() {
                    writeln!(self.output, "  {}. {}", i + 1, title.r#type)?;
                    writeln!(self.output, "     {}", title.title)?;
                    if !title.description.is_empty() {
                        writeln!(self.output, "     {}", title.description)?;
                    }
                }
            }
            ActionOutcome::TitleSelected(title) => {
                writeln!(self.output, "✅ 已選擇：{}", title.title)?;
            }
            ActionOutcome::Purpose { draft, saved_to } => {
                writeln!(self.output, "🎯 研究目的：\n{}", draft.content)?;
                writeln!(self.output, "\n📖 參考文獻：\n{}", draft.references)?;
                if let Some(path) = saved_to {
                    writeln!(self.output, "💾 研究目的已暫存：{}", path.display())?;
                }
            }
            ActionOutcome::LiteratureReviewEntered => {
                writeln!(self.output, "📚 已進入文獻探討階段")?;
            }
            ActionOutcome::SectionPlan(sections) => {
                writeln!(self.output, "🗂️ 文獻探討架構：")?;
                for section in sections {
                    writeln!(self.output, "  {}. {}", section.order, section.display_title())?;
                    for subtitle in &section.subtitles {
                        writeln!(
                            self.output,
                            "     - {} / {}",
                            subtitle.subtitle_zh, subtitle.subtitle_en
                        )?;
                    }
                    for query in &section.search_queries {
                        writeln!(self.output, "     🔍 {}：{}", query.focus, query.query)?;
                    }
                }
            }
            ActionOutcome::LiteratureAdded {
                section,
                added,
                total,
            } => {
                for entry in added {
                    writeln!(self.output, "  + {}", entry.citation)?;
                }
                writeln!(
                    self.output,
                    "✅ 第 {} 節新增 {} 篇文獻，共 {} 篇",
                    section,
                    added.len(),
                    total
                )?;
            }
            ActionOutcome::SectionReview { section, draft } => {
                writeln!(self.output, "📄 第 {} 節文獻探討：\n{}", section, draft.content)?;
                writeln!(self.output, "\n📖 參考文獻：\n{}", draft.references)?;
            }
            ActionOutcome::FullReview(draft) => {
                writeln!(self.output, "📄 完整文獻探討：\n{}", draft.content)?;
                writeln!(self.output, "\n📖 參考文獻：\n{}", draft.references)?;
            }
        }
        Ok(())
    }

    fn print_error(&mut self, error: &WizardError) -> Result<()> {
        writeln!(self.output, "❌ {}", error)?;
        if let Some(raw) = error.raw_response() {
            writeln!(self.output, "--- 模型原始回應 ---\n{}\n-------------------", raw)?;
        }
        Ok(())
    }
}
