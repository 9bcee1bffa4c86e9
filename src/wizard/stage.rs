use async_trait::async_trait;

use crate::llm::client::ChatRequest;
use crate::prompts::PromptPair;
use crate::wizard::context::WizardContext;
use crate::wizard::error::ExternalCallResult;
use crate::wizard::state::WizardState;

/// 阶段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageType {
    Keywords,
    Titles,
    Purpose,
    SectionPlan,
    LiteratureAnalysis,
    SectionReview,
    FullReview,
}

impl std::fmt::Display for StageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StageType::Keywords => "關鍵詞提取",
            StageType::Titles => "研究題目生成",
            StageType::Purpose => "研究目的生成",
            StageType::SectionPlan => "文獻探討架構規劃",
            StageType::LiteratureAnalysis => "文獻分析",
            StageType::SectionReview => "章節文獻探討",
            StageType::FullReview => "完整文獻探討",
        };
        write!(f, "{}", label)
    }
}

/// 模型调用参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallParams {
    pub temperature: f64,
    /// 为 None 时使用配置中的 max_tokens
    pub max_tokens: Option<u32>,
}

impl StageType {
    pub fn call_params(self) -> CallParams {
        let (temperature, max_tokens) = match self {
            StageType::Keywords => (0.3, None),
            StageType::Titles => (0.7, None),
            StageType::Purpose => (0.7, Some(2500)),
            StageType::SectionPlan => (0.3, Some(2000)),
            StageType::LiteratureAnalysis => (0.3, None),
            StageType::SectionReview => (0.7, Some(3000)),
            StageType::FullReview => (0.7, Some(4000)),
        };
        CallParams {
            temperature,
            max_tokens,
        }
    }
}

/// 向导阶段
///
/// 阶段只读取状态，产出结果由向导在成功后写入，失败不会改动状态。
#[async_trait]
pub trait Stage: Send + Sync {
    /// 阶段产出
    type Output: Send;

    fn stage_type(&self) -> StageType;

    fn call_params(&self) -> CallParams {
        self.stage_type().call_params()
    }

    /// 检查调用模型前必须具备的数据
    fn check_prerequisites(&self, state: &WizardState) -> ExternalCallResult<()>;

    fn build_prompts(&self, state: &WizardState) -> PromptPair;

    /// 解析修剪后的模型回应
    fn parse(&self, raw: &str) -> ExternalCallResult<Self::Output>;

    async fn execute(
        &self,
        context: &WizardContext,
        state: &WizardState,
    ) -> ExternalCallResult<Self::Output> {
        // 1. 缺少数据时直接失败，不调用模型
        self.check_prerequisites(state)?;

        // 2. 组装提示词
        let prompts = self.build_prompts(state);
        let params = self.call_params();

        // 3. 调用模型
        println!("🤖 正在執行{}...", self.stage_type());
        let request = ChatRequest::new(&context.config.llm.model, params.temperature)
            .system(prompts.system)
            .user(prompts.user)
            .max_tokens(params.max_tokens);

        let response = context.model.complete(request).await.inspect_err(|e| {
            eprintln!("❌ {}失敗: {}", self.stage_type(), e);
        })?;
        tracing::debug!(stage = %self.stage_type(), chars = response.len(), "stage response received");

        // 4. 解析回应
        let output = self.parse(response.trim())?;
        println!("✅ {}完成", self.stage_type());
        Ok(output)
    }
}
