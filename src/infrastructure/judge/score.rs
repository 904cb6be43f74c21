//! Relevance score judge

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::JudgeModel;
use crate::domain::judge::{PromptTemplate, ScoreJudge};
use crate::domain::validation::{MAX_RELEVANCE_SCORE, MIN_RELEVANCE_SCORE};
use crate::domain::verse::VerseCandidate;
use crate::domain::DomainError;

const JUDGE: &str = "score";

static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)").expect("score pattern is valid"));

/// Asks the model for a 1 to 10 relevance score
#[derive(Debug, Clone)]
pub struct LlmScoreJudge {
    model: JudgeModel,
    prompt: PromptTemplate,
}

impl LlmScoreJudge {
    pub fn new(model: JudgeModel, prompt: PromptTemplate) -> Self {
        Self { model, prompt }
    }

    fn build_prompt(&self, claim: &str, candidate: &VerseCandidate) -> Result<String, DomainError> {
        let verse = candidate.describe();
        let values = HashMap::from([("claim", claim), ("verse", verse.as_str())]);

        self.prompt
            .render(&values)
            .map_err(|e| DomainError::configuration(e.to_string()))
    }
}

/// First integer in the response, which must lie in the score range
fn parse_score(response: &str) -> Result<u8, DomainError> {
    let digits = SCORE_PATTERN
        .captures(response)
        .and_then(|cap| cap.get(1))
        .ok_or_else(|| DomainError::judge_response(JUDGE, format!("no integer in '{}'", response)))?
        .as_str();

    let score: u8 = digits.parse().map_err(|_| {
        DomainError::judge_response(JUDGE, format!("score '{}' out of range", digits))
    })?;

    if !(MIN_RELEVANCE_SCORE..=MAX_RELEVANCE_SCORE).contains(&score) {
        return Err(DomainError::judge_response(
            JUDGE,
            format!("score {} out of range", score),
        ));
    }

    Ok(score)
}

#[async_trait]
impl ScoreJudge for LlmScoreJudge {
    async fn score(&self, claim: &str, candidate: &VerseCandidate) -> Result<u8, DomainError> {
        let prompt = self.build_prompt(claim, candidate)?;
        let request = self.model.request(prompt).max_tokens(16).build();

        let content = self.model.complete(JUDGE, request).await?;
        let score = self.model.finish(JUDGE, parse_score(&content))?;

        debug!(ayah = candidate.aya_number, score, "Relevance judged");
        Ok(score)
    }
}
