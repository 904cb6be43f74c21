//! Query embedding with dimension checks

use std::sync::Arc;

use tracing::debug;

use super::{EmbeddingProvider, EmbeddingRequest, EmbeddingVector};
use crate::domain::DomainError;

/// Turns claim text into a query vector for the verse index
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    expected_dimensions: Option<usize>,
}

impl EmbeddingClient {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            expected_dimensions: None,
        }
    }

    /// Reject vectors whose length differs from the index's stored vectors
    pub fn with_expected_dimensions(mut self, dimensions: usize) -> Self {
        self.expected_dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embed a single text. Failures never degrade into a zero vector.
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError> {
        let request = EmbeddingRequest::new(&self.model, text);
        let response = self.provider.embed(request).await?;

        let values = response.into_first().ok_or_else(|| {
            DomainError::provider(
                self.provider.provider_name(),
                "Embedding response contained no vectors",
            )
        })?;
        let vector = EmbeddingVector::new(values);

        if vector.is_empty() {
            return Err(DomainError::provider(
                self.provider.provider_name(),
                "Embedding response contained an empty vector",
            ));
        }

        if let Some(expected) = self.expected_dimensions {
            if vector.dimensions() != expected {
                return Err(DomainError::validation(format!(
                    "Embedding model '{}' returned {} dimensions, index expects {}",
                    self.model,
                    vector.dimensions(),
                    expected
                )));
            }
        }

        debug!(
            model = %self.model,
            dimensions = vector.dimensions(),
            "Embedded claim text"
        );

        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_embed_returns_vector() {
        let provider = Arc::new(MockEmbeddingProvider::new("mock", 8));
        let client = EmbeddingClient::new(provider.clone(), "mock-embedding")
            .with_expected_dimensions(8);

        let vector = client.embed("charity erases sin").await.unwrap();

        assert_eq!(vector.dimensions(), 8);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_a_zero_vector() {
        let provider = Arc::new(MockEmbeddingProvider::new("mock", 8).with_error("quota exceeded"));
        let client = EmbeddingClient::new(provider, "mock-embedding");

        let result = client.embed("charity erases sin").await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let provider = Arc::new(MockEmbeddingProvider::new("mock", 8).with_empty_response());
        let client = EmbeddingClient::new(provider, "mock-embedding");

        let result = client.embed("charity erases sin").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no vectors"));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let provider = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let client =
            EmbeddingClient::new(provider, "mock-embedding").with_expected_dimensions(1536);

        let result = client.embed("charity erases sin").await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_blank_text_is_forwarded_to_the_model() {
        let provider = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let client = EmbeddingClient::new(provider.clone(), "mock-embedding");

        let result = client.embed("   ").await;

        assert!(result.is_ok());
        assert_eq!(provider.calls(), 1);
    }
}
