//! Domain layer - Core entities, seams and pipeline logic

pub mod embedding;
pub mod error;
pub mod judge;
pub mod llm;
pub mod validation;
pub mod verse;

pub use embedding::{EmbeddingClient, EmbeddingProvider, EmbeddingVector};
pub use error::DomainError;
pub use judge::{LabelJudge, RelationshipLabel, ScoreJudge, Verdict, VerdictJudge, VerdictTag};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use validation::{
    Claim, PipelineStage, RelationshipClassifier, RelevanceFilter, ValidationError,
    ValidationResponse, ValidationResult, VerdictSynthesizer,
};
pub use verse::{VerseCandidate, VerseIndex};
