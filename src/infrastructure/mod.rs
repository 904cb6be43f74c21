//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod judge;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod verse_index;
