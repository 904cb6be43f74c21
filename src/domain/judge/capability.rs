//! Typed judge capabilities
//!
//! Each judge call has its own input, output and parse contract. Implementations
//! return `DomainError::JudgeResponse` when a response does not fit its shape.

use async_trait::async_trait;

use super::{RelationshipLabel, Verdict};
use crate::domain::verse::VerseCandidate;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Scores how closely a verse relates to a claim, 1 to 10
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScoreJudge: Send + Sync {
    async fn score(&self, claim: &str, candidate: &VerseCandidate) -> Result<u8, DomainError>;
}

/// Labels the relationship between a claim and one verse
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LabelJudge: Send + Sync {
    async fn classify(
        &self,
        claim: &str,
        candidate: &VerseCandidate,
    ) -> Result<RelationshipLabel, DomainError>;
}

/// Produces the final verdict from the partitioned evidence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VerdictJudge: Send + Sync {
    async fn judge(
        &self,
        claim: &str,
        supported: &[VerseCandidate],
        contradicted: &[VerseCandidate],
    ) -> Result<Verdict, DomainError>;
}
