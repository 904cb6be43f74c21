use serde::{Deserialize, Serialize};

/// A vector as returned by the provider, tagged with its input position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub index: usize,
    pub vector: Vec<f32>,
}

/// Provider reply to an [`EmbeddingRequest`](super::EmbeddingRequest)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub model: String,
    pub data: Vec<Embedding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, data: Vec<Embedding>) -> Self {
        Self {
            model: model.into(),
            data,
            prompt_tokens: None,
        }
    }

    pub fn with_prompt_tokens(mut self, tokens: u32) -> Self {
        self.prompt_tokens = Some(tokens);
        self
    }

    /// The vector for input position 0, whatever order the provider used
    pub fn into_first(self) -> Option<Vec<f32>> {
        self.data.into_iter().find(|e| e.index == 0).map(|e| e.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_first_picks_index_zero() {
        let response = EmbeddingResponse::new(
            "text-embedding-ada-002",
            vec![
                Embedding { index: 1, vector: vec![0.3, 0.4] },
                Embedding { index: 0, vector: vec![0.1, 0.2] },
            ],
        );

        assert_eq!(response.into_first(), Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_into_first_without_index_zero() {
        let response = EmbeddingResponse::new(
            "text-embedding-ada-002",
            vec![Embedding { index: 2, vector: vec![1.0] }],
        );

        assert_eq!(response.into_first(), None);
    }
}
