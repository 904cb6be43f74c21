//! Claim embedding: provider seam, wire model and the query client

mod client;
mod provider;
mod request;
mod response;
mod vector;

pub use client::EmbeddingClient;
pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::{Embedding, EmbeddingResponse};
pub use vector::EmbeddingVector;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
