use inquire::error::InquireResult;
use inquire::{Editor, MultiSelect, Select, Text};

/// 终端提问。选择类问题返回从 0 开始的序号
pub trait Prompter {
    fn select(&mut self, message: &str, options: &[String]) -> InquireResult<usize>;

    fn multi_select(&mut self, message: &str, options: &[String]) -> InquireResult<Vec<usize>>;

    /// 单行输入
    fn text(&mut self, message: &str) -> InquireResult<String>;

    /// 多行输入，例如贴上的文献
    fn editor(&mut self, message: &str) -> InquireResult<String>;
}

/// 基于 inquire 的交互式终端
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&mut self, message: &str, options: &[String]) -> InquireResult<usize> {
        Select::new(message, options.to_vec())
            .with_help_message("↑↓ 移動，Enter 確認，ESC 返回")
            .raw_prompt()
            .map(|choice| choice.index)
    }

    fn multi_select(&mut self, message: &str, options: &[String]) -> InquireResult<Vec<usize>> {
        MultiSelect::new(message, options.to_vec())
            .with_help_message("空白鍵勾選，Enter 確認，ESC 返回")
            .raw_prompt()
            .map(|choices| choices.into_iter().map(|choice| choice.index).collect())
    }

    fn text(&mut self, message: &str) -> InquireResult<String> {
        Text::new(message)
            .prompt()
            .map(|answer| answer.trim().to_string())
    }

    fn editor(&mut self, message: &str) -> InquireResult<String> {
        Editor::new(message)
            .with_file_extension(".md")
            .with_help_message("在編輯器中輸入內容，存檔並關閉後繼續")
            .prompt()
            .map(|answer| answer.trim().to_string())
    }
}
