use serde::{Deserialize, Serialize};

use super::Message;

/// Named JSON schema for schema-constrained output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmJsonSchema {
    pub name: String,
    pub schema: serde_json::Value,
    #[serde(default)]
    pub strict: bool,
}

impl LlmJsonSchema {
    pub fn strict(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }
}

/// Output constraint, serialized in the chat completions `response_format` shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmResponseFormat {
    Text,
    JsonObject,
    JsonSchema { json_schema: LlmJsonSchema },
}

/// A single judge prompt with its sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<LlmResponseFormat>,
}

impl LlmRequest {
    pub fn builder() -> LlmRequestBuilder {
        LlmRequestBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct LlmRequestBuilder {
    messages: Vec<Message>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    response_format: Option<LlmResponseFormat>,
}

impl LlmRequestBuilder {
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn response_format(mut self, format: LlmResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn json_schema(self, schema: LlmJsonSchema) -> Self {
        self.response_format(LlmResponseFormat::JsonSchema {
            json_schema: schema,
        })
    }

    pub fn build(self) -> LlmRequest {
        LlmRequest {
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: self.response_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = LlmRequest::builder()
            .user("Hadith: ...")
            .temperature(0.0)
            .max_tokens(16)
            .build();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.max_tokens, Some(16));
        assert!(request.response_format.is_none());
    }

    #[test]
    fn test_response_format_wire_shape() {
        let schema = LlmJsonSchema::strict("verdict", serde_json::json!({"type": "object"}));
        let format = LlmResponseFormat::JsonSchema { json_schema: schema };

        assert_eq!(
            serde_json::to_value(&format).unwrap(),
            serde_json::json!({
                "type": "json_schema",
                "json_schema": { "name": "verdict", "schema": {"type": "object"}, "strict": true }
            })
        );
        assert_eq!(
            serde_json::to_value(LlmResponseFormat::JsonObject).unwrap(),
            serde_json::json!({"type": "json_object"})
        );
    }
}
