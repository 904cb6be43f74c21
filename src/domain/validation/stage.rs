//! Pipeline stages and run-level failures

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;

/// States of a validation run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PipelineStage {
    ClaimExtracted,
    Embedded,
    Retrieved,
    Filtered,
    Classified,
    Verdicted,
}

impl PipelineStage {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaimExtracted => "claim_extracted",
            Self::Embedded => "embedded",
            Self::Retrieved => "retrieved",
            Self::Filtered => "filtered",
            Self::Classified => "classified",
            Self::Verdicted => "verdicted",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ClaimExtracted => "ClaimExtracted",
            Self::Embedded => "Embedded",
            Self::Retrieved => "Retrieved",
            Self::Filtered => "Filtered",
            Self::Classified => "Classified",
            Self::Verdicted => "Verdicted",
        };
        f.write_str(name)
    }
}

/// Fatal outcome of a validation run. No partial result accompanies it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed at stage {stage}: {source}")]
    StageFailed {
        stage: PipelineStage,
        #[source]
        source: DomainError,
    },

    #[error("Validation deadline of {deadline_ms}ms exceeded at stage {stage}")]
    DeadlineExceeded { stage: PipelineStage, deadline_ms: u64 },
}

impl ValidationError {
    pub fn stage_failed(stage: PipelineStage, source: DomainError) -> Self {
        Self::StageFailed { stage, source }
    }

    /// The stage the run failed in
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::InvalidInput(_) => PipelineStage::ClaimExtracted,
            Self::StageFailed { stage, .. } | Self::DeadlineExceeded { stage, .. } => *stage,
        }
    }

    /// Label for the run outcome metric
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::StageFailed { .. } => "failed",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_message_names_stage_and_cause() {
        let error = ValidationError::stage_failed(
            PipelineStage::Embedded,
            DomainError::provider("openai", "HTTP 500"),
        );

        assert_eq!(error.stage(), PipelineStage::Embedded);
        assert_eq!(
            error.to_string(),
            "Validation failed at stage Embedded: Provider error: openai - HTTP 500"
        );
    }

    #[test]
    fn test_invalid_input_belongs_to_extraction() {
        let error = ValidationError::InvalidInput("claim text is empty".to_string());
        assert_eq!(error.stage(), PipelineStage::ClaimExtracted);
        assert_eq!(error.outcome(), "invalid_input");
    }
}
