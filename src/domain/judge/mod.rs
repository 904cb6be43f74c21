//! Judge outcomes, capabilities and prompts

mod capability;
mod label;
mod prompts;
mod template;

pub use capability::{LabelJudge, ScoreJudge, VerdictJudge};
pub use label::{RelationshipLabel, Verdict, VerdictTag, DEFAULT_NEUTRAL_LABEL};
pub use prompts::{CompiledPrompts, JudgePrompts};
pub use template::{PromptTemplate, TemplateError, TemplateVariable};

#[cfg(test)]
pub use capability::{MockLabelJudge, MockScoreJudge, MockVerdictJudge};
