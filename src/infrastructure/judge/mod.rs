//! LLM-backed judges

mod label;
mod model;
mod score;
mod verdict;

pub use label::LlmLabelJudge;
pub use model::{extract_json, JudgeModel, StructuredOutput};
pub use score::LlmScoreJudge;
pub use verdict::LlmVerdictJudge;
