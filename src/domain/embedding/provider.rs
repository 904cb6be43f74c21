use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Remote model that turns text into vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    fn provider_name(&self) -> &'static str;

    /// Native output size of a model, if the provider knows it
    fn dimensions(&self, model: &str) -> Option<usize>;
}
