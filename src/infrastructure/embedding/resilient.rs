//! Embedding provider decorator adding timeouts and retries

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;
use crate::infrastructure::resilience::CallGuard;

#[derive(Debug)]
pub struct ResilientEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    guard: CallGuard,
}

impl ResilientEmbeddingProvider {
    pub fn new(inner: Arc<dyn EmbeddingProvider>, guard: CallGuard) -> Self {
        Self { inner, guard }
    }
}

#[async_trait]
impl EmbeddingProvider for ResilientEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        self.guard
            .run("embedding", || self.inner.embed(request.clone()))
            .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        self.inner.dimensions(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::infrastructure::resilience::RetryPolicy;

    #[tokio::test]
    async fn test_retries_then_fails() {
        let inner = Arc::new(MockEmbeddingProvider::new("mock", 4).with_error("connection reset"));
        let guard = CallGuard::new(
            RetryPolicy {
                max_retries: 1,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                backoff_multiplier: 1.0,
            },
            None,
        );
        let provider = ResilientEmbeddingProvider::new(inner.clone(), guard);

        let result = provider
            .embed(EmbeddingRequest::new("mock-embedding", "text"))
            .await;

        assert!(result.is_err());
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_passthrough_guard_calls_once() {
        let inner = Arc::new(MockEmbeddingProvider::new("mock", 4));
        let provider = ResilientEmbeddingProvider::new(inner.clone(), CallGuard::passthrough());

        let response = provider
            .embed(EmbeddingRequest::new("mock-embedding", "text"))
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(provider.dimensions("mock-embedding"), Some(4));
        assert_eq!(inner.calls(), 1);
    }
}
