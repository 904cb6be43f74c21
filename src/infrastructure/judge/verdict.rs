//! Final verdict judge

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::{extract_json, JudgeModel};
use crate::domain::judge::{PromptTemplate, Verdict, VerdictJudge, VerdictTag};
use crate::domain::validation::render_evidence;
use crate::domain::verse::VerseCandidate;
use crate::domain::DomainError;

const JUDGE: &str = "verdict";

#[derive(Debug, Deserialize)]
struct VerdictResponse {
    confidence: f64,
    verdict: VerdictTag,
    summary: String,
}

/// Asks the model for a verdict over the supplied evidence only
#[derive(Debug, Clone)]
pub struct LlmVerdictJudge {
    model: JudgeModel,
    prompt: PromptTemplate,
}

impl LlmVerdictJudge {
    pub fn new(model: JudgeModel, prompt: PromptTemplate) -> Self {
        Self { model, prompt }
    }

    fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "confidence": { "type": "number" },
                "verdict": { "type": "string", "enum": ["Valid", "Invalid", "Unknown"] },
                "summary": { "type": "string" }
            },
            "required": ["confidence", "verdict", "summary"],
            "additionalProperties": false
        })
    }

    fn build_prompt(
        &self,
        claim: &str,
        supported: &[VerseCandidate],
        contradicted: &[VerseCandidate],
    ) -> Result<String, DomainError> {
        let supported = render_evidence(supported);
        let contradicted = render_evidence(contradicted);
        let values = HashMap::from([
            ("claim", claim),
            ("supported", supported.as_str()),
            ("contradicted", contradicted.as_str()),
        ]);

        self.prompt
            .render(&values)
            .map_err(|e| DomainError::configuration(e.to_string()))
    }
}

fn parse_verdict(response: &str) -> Result<Verdict, DomainError> {
    let json = extract_json(response)
        .ok_or_else(|| DomainError::judge_response(JUDGE, "no JSON object in response"))?;

    let parsed: VerdictResponse = serde_json::from_str(json)
        .map_err(|e| DomainError::judge_response(JUDGE, e.to_string()))?;

    Verdict::new(parsed.verdict, parsed.confidence, parsed.summary)
}

#[async_trait]
impl VerdictJudge for LlmVerdictJudge {
    async fn judge(
        &self,
        claim: &str,
        supported: &[VerseCandidate],
        contradicted: &[VerseCandidate],
    ) -> Result<Verdict, DomainError> {
        let prompt = self.build_prompt(claim, supported, contradicted)?;
        let request = self
            .model
            .structured_request(prompt, "hadith_verdict", Self::schema())
            .build();

        let content = self.model.complete(JUDGE, request).await?;
        self.model.finish(JUDGE, parse_verdict(&content))
    }
}
