use thiserror::Error;

use crate::extract::MarkerError;
use crate::llm::client::LlmError;
use crate::wizard::state::WizardStep;

/// 单个阶段调用模型时的失败
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("缺少必要資料：{0}")]
    MissingPrerequisite(String),

    #[error("模型服務呼叫失敗：{0}")]
    Transport(#[from] LlmError),

    #[error("無法解析模型回應：{reason}")]
    Malformed { reason: String, raw: String },
}

impl StageError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        StageError::Malformed {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// 解析失败时保留的原始回应
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            StageError::Malformed { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub(crate) fn from_marker(error: MarkerError, raw: &str) -> Self {
        StageError::malformed(error.to_string(), raw)
    }
}

/// 阶段调用的结果：结构化输出或带诊断信息的失败
pub type ExternalCallResult<T> = Result<T, StageError>;

/// 向导层面的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("無法從{from}返回{to}")]
    StepRegression { from: WizardStep, to: WizardStep },

    #[error("選擇無效：{0}")]
    InvalidSelection(String),

    #[error("找不到第 {0} 節")]
    UnknownSection(usize),

    #[error("此操作需要先進入文獻探討階段（目前為{0}）")]
    NotInLiteratureReview(WizardStep),

    #[error("缺少必要資料：{0}")]
    MissingPrerequisite(String),

    #[error(transparent)]
    Stage(#[from] StageError),
}

impl WizardError {
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            WizardError::Stage(stage) => stage.raw_response(),
            _ => None,
        }
    }
}
