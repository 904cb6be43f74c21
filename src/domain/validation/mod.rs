//! Validation pipeline components

mod claim;
mod relationship;
mod relevance;
mod result;
mod stage;
mod synthesizer;

pub use claim::{Claim, ClaimExtractor, ExtractedClaim, PassthroughClaimExtractor};
pub use relationship::{ClassifiedCandidates, RelationshipClassifier};
pub use relevance::{
    RelevanceFilter, DEFAULT_MAX_CONCURRENCY, DEFAULT_RELEVANCE_THRESHOLD, MAX_RELEVANCE_SCORE,
    MIN_RELEVANCE_SCORE,
};
pub use result::{ValidationResponse, ValidationResult};
pub use stage::{PipelineStage, ValidationError};
pub use synthesizer::{render_evidence, VerdictSynthesizer};
