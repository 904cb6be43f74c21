use serde::{Deserialize, Serialize};

/// One text to embed. The pipeline embeds exactly one claim per run,
/// so batching is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    text: String,
    /// Output size for models that support shortening
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_kept_verbatim() {
        let request = EmbeddingRequest::new("text-embedding-ada-002", "  ");

        assert_eq!(request.text(), "  ");
        assert!(request.dimensions().is_none());
    }

    #[test]
    fn test_dimensions_serialized_only_when_set() {
        let plain = serde_json::to_value(EmbeddingRequest::new("m", "t")).unwrap();
        assert!(plain.get("dimensions").is_none());

        let shortened =
            serde_json::to_value(EmbeddingRequest::new("m", "t").with_dimensions(256)).unwrap();
        assert_eq!(shortened["dimensions"], 256);
    }
}
