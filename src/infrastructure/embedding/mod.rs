//! Embedding provider implementations

mod openai;
mod resilient;

pub use openai::OpenAiEmbeddingProvider;
pub use resilient::ResilientEmbeddingProvider;

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
