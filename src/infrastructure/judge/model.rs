//! Shared judge model handle

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::llm::{LlmJsonSchema, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponseFormat};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_judge_call, JudgeCallStatus};

/// How structured judges ask the model to constrain its output.
/// The response is schema-checked locally in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredOutput {
    #[default]
    JsonObject,
    JsonSchema,
}

/// One reusable model client shared by all judges
#[derive(Debug, Clone)]
pub struct JudgeModel {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    structured_output: StructuredOutput,
}

impl JudgeModel {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            structured_output: StructuredOutput::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_structured_output(mut self, structured_output: StructuredOutput) -> Self {
        self.structured_output = structured_output;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn request(&self, prompt: String) -> LlmRequestBuilder {
        LlmRequest::builder().user(prompt).temperature(self.temperature)
    }

    pub(crate) fn structured_request(
        &self,
        prompt: String,
        name: &str,
        schema: serde_json::Value,
    ) -> LlmRequestBuilder {
        let builder = self.request(prompt);
        match self.structured_output {
            StructuredOutput::JsonObject => builder.response_format(LlmResponseFormat::JsonObject),
            StructuredOutput::JsonSchema => builder.json_schema(LlmJsonSchema::strict(name, schema)),
        }
    }

    /// Send a request and return its text content
    pub(crate) async fn complete(
        &self,
        judge: &'static str,
        request: LlmRequest,
    ) -> Result<String, DomainError> {
        let response = match self.provider.chat(&self.model, request).await {
            Ok(response) => response,
            Err(e) => {
                record_judge_call(judge, JudgeCallStatus::ProviderError);
                return Err(e);
            }
        };

        if response.is_truncated() {
            warn!(judge, model = %self.model, "Judge response hit the token limit");
        }

        match response.content() {
            Some(content) => {
                debug!(
                    judge,
                    model = %self.model,
                    tokens = response.usage.map(|usage| usage.total()),
                    response = content,
                    "Judge responded"
                );
                Ok(content.to_string())
            }
            None => {
                record_judge_call(judge, JudgeCallStatus::ParseError);
                Err(DomainError::judge_response(judge, "empty response"))
            }
        }
    }

    /// Record the parse outcome of a judge response
    pub(crate) fn finish<T>(
        &self,
        judge: &'static str,
        parsed: Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let status = match parsed {
            Ok(_) => JudgeCallStatus::Success,
            Err(_) => JudgeCallStatus::ParseError,
        };
        record_judge_call(judge, status);
        parsed
    }
}

/// Extract a JSON object from a string (handles markdown code blocks)
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}
