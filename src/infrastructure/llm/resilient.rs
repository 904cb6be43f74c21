//! LLM provider decorator adding timeouts and retries

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::llm::{LlmProvider, LlmRequest, LlmResponse};
use crate::domain::DomainError;
use crate::infrastructure::resilience::CallGuard;

#[derive(Debug)]
pub struct ResilientLlmProvider {
    inner: Arc<dyn LlmProvider>,
    guard: CallGuard,
}

impl ResilientLlmProvider {
    pub fn new(inner: Arc<dyn LlmProvider>, guard: CallGuard) -> Self {
        Self { inner, guard }
    }
}

#[async_trait]
impl LlmProvider for ResilientLlmProvider {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        self.guard
            .run("chat completion", || self.inner.chat(model, request.clone()))
            .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::infrastructure::resilience::RetryPolicy;

    fn guard(max_retries: u32) -> CallGuard {
        CallGuard::new(
            RetryPolicy {
                max_retries,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                backoff_multiplier: 1.0,
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let inner = Arc::new(MockLlmProvider::new("mock").with_error("HTTP 502"));
        let provider = ResilientLlmProvider::new(inner.clone(), guard(2));

        let result = provider
            .chat("gpt-3.5-turbo", LlmRequest::builder().user("x").build())
            .await;

        assert!(result.is_err());
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let inner = Arc::new(MockLlmProvider::new("mock").with_content("Score: 9"));
        let provider = ResilientLlmProvider::new(inner.clone(), guard(2));

        let response = provider
            .chat("gpt-3.5-turbo", LlmRequest::builder().user("x").build())
            .await
            .unwrap();

        assert_eq!(response.content(), Some("Score: 9"));
        assert_eq!(inner.calls(), 1);
        assert_eq!(provider.provider_name(), "mock");
    }
}
