//! LLM provider implementations

mod http_client;
mod openai;
mod resilient;

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL};
pub use resilient::ResilientLlmProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
