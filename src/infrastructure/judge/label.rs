//! Relationship label judge

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::{extract_json, JudgeModel};
use crate::domain::judge::{LabelJudge, PromptTemplate, RelationshipLabel, DEFAULT_NEUTRAL_LABEL};
use crate::domain::verse::VerseCandidate;
use crate::domain::DomainError;

const JUDGE: &str = "label";

#[derive(Debug, Deserialize)]
struct LabelResponse {
    classification: String,
}

/// Asks the model for one of the three relationship labels
#[derive(Debug, Clone)]
pub struct LlmLabelJudge {
    model: JudgeModel,
    prompt: PromptTemplate,
    neutral_label: String,
}

impl LlmLabelJudge {
    pub fn new(model: JudgeModel, prompt: PromptTemplate) -> Self {
        Self {
            model,
            prompt,
            neutral_label: DEFAULT_NEUTRAL_LABEL.to_string(),
        }
    }

    /// Wording the model uses for the neutral label
    pub fn with_neutral_label(mut self, neutral_label: impl Into<String>) -> Self {
        self.neutral_label = neutral_label.into();
        self
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "classification": {
                    "type": "string",
                    "enum": ["Supported", self.neutral_label, "Contradicted"]
                }
            },
            "required": ["classification"],
            "additionalProperties": false
        })
    }

    fn build_prompt(&self, claim: &str, candidate: &VerseCandidate) -> Result<String, DomainError> {
        let verse = candidate.describe();
        let values = HashMap::from([
            ("claim", claim),
            ("verse", verse.as_str()),
            ("neutral_label", self.neutral_label.as_str()),
        ]);

        self.prompt
            .render(&values)
            .map_err(|e| DomainError::configuration(e.to_string()))
    }

    fn parse_label(&self, response: &str) -> Result<RelationshipLabel, DomainError> {
        let json = extract_json(response)
            .ok_or_else(|| DomainError::judge_response(JUDGE, "no JSON object in response"))?;

        let parsed: LabelResponse = serde_json::from_str(json)
            .map_err(|e| DomainError::judge_response(JUDGE, e.to_string()))?;

        RelationshipLabel::from_judge_label(&parsed.classification, &self.neutral_label).ok_or_else(
            || {
                DomainError::judge_response(
                    JUDGE,
                    format!("unknown classification '{}'", parsed.classification),
                )
            },
        )
    }
}

#[async_trait]
impl LabelJudge for LlmLabelJudge {
    async fn classify(
        &self,
        claim: &str,
        candidate: &VerseCandidate,
    ) -> Result<RelationshipLabel, DomainError> {
        let prompt = self.build_prompt(claim, candidate)?;
        let request = self
            .model
            .structured_request(prompt, "relationship", self.schema())
            .build();

        let content = self.model.complete(JUDGE, request).await?;
        self.model.finish(JUDGE, self.parse_label(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::judge::JudgePrompts;
    use crate::domain::llm::{LlmResponseFormat, MockLlmProvider};

    fn judge(provider: Arc<MockLlmProvider>) -> LlmLabelJudge {
        let prompts = JudgePrompts::default().compile().unwrap();
        LlmLabelJudge::new(JudgeModel::new(provider, "gpt-3.5-turbo"), prompts.relationship)
    }

    fn verse() -> VerseCandidate {
        VerseCandidate::new(0.8, "Charity", "Al-Baqarah", 271)
    }

    #[tokio::test]
    async fn test_classify_supported() {
        let provider =
            Arc::new(MockLlmProvider::new("mock").with_content(r#"{"classification": "Supported"}"#));
        let judge = judge(provider.clone());

        let label = judge.classify("charity erases sin", &verse()).await.unwrap();
        assert_eq!(label, RelationshipLabel::Supported);

        let request = provider.last_request().unwrap();
        assert_eq!(request.response_format, Some(LlmResponseFormat::JsonObject));
        let prompt = request.messages[0].content_text();
        assert!(prompt.contains("**Weak Support** – The ayah is somewhat related"));
        assert!(prompt.contains("\"Charity (Surah: Al-Baqarah, Ayah: 271)\""));
    }

    #[tokio::test]
    async fn test_classify_weak_support_in_code_block() {
        let provider = Arc::new(
            MockLlmProvider::new("mock")
                .with_content("```json\n{\"classification\": \"Weak Support\"}\n```"),
        );

        let label = judge(provider).classify("claim", &verse()).await.unwrap();
        assert_eq!(label, RelationshipLabel::WeakSupport);
    }

    #[tokio::test]
    async fn test_custom_neutral_label() {
        let provider =
            Arc::new(MockLlmProvider::new("mock").with_content(r#"{"classification": "Related"}"#));
        let judge = judge(provider.clone()).with_neutral_label("Related");

        let label = judge.classify("claim", &verse()).await.unwrap();
        assert_eq!(label, RelationshipLabel::WeakSupport);
        assert_eq!(judge.schema()["properties"]["classification"]["enum"][1], "Related");

        let prompt = provider.last_request().unwrap().messages[0].content_text().to_string();
        assert!(prompt.contains("**Related**"));
    }

    #[tokio::test]
    async fn test_free_text_is_rejected() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content("Supported"));

        let result = judge(provider).classify("claim", &verse()).await;
        assert!(matches!(result, Err(DomainError::JudgeResponse { .. })));
    }

    #[tokio::test]
    async fn test_unknown_label_is_rejected() {
        let provider = Arc::new(
            MockLlmProvider::new("mock").with_content(r#"{"classification": "Strongly Supported"}"#),
        );

        let result = judge(provider).classify("claim", &verse()).await;
        assert!(matches!(result, Err(DomainError::JudgeResponse { .. })));
    }
}
