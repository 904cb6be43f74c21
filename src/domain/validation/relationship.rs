//! Pairwise relationship classification and partitioning

use std::sync::Arc;

use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use super::relevance::DEFAULT_MAX_CONCURRENCY;
use super::Claim;
use crate::domain::judge::{LabelJudge, RelationshipLabel};
use crate::domain::verse::VerseCandidate;

/// Filtered candidates split by relationship label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedCandidates {
    pub supported: Vec<VerseCandidate>,
    pub contradicted: Vec<VerseCandidate>,
    /// Candidates labelled neutral, dropped from both partitions
    pub weak_support: usize,
}

impl ClassifiedCandidates {
    pub fn total(&self) -> usize {
        self.supported.len() + self.contradicted.len() + self.weak_support
    }
}

#[derive(Clone)]
pub struct RelationshipClassifier {
    judge: Arc<dyn LabelJudge>,
    max_concurrency: usize,
}

impl RelationshipClassifier {
    pub fn new(judge: Arc<dyn LabelJudge>) -> Self {
        Self {
            judge,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Label one pair. Any failure yields `WeakSupport`.
    pub async fn classify(&self, claim: &Claim, candidate: &VerseCandidate) -> RelationshipLabel {
        match self.judge.classify(claim.as_str(), candidate).await {
            Ok(label) => {
                debug!(
                    surah = %candidate.surah_name_english,
                    ayah = candidate.aya_number,
                    label = %label,
                    "Classified candidate"
                );
                label
            }
            Err(e) => {
                warn!(
                    surah = %candidate.surah_name_english,
                    ayah = candidate.aya_number,
                    error = %e,
                    "Classification failed, falling back to {}",
                    RelationshipLabel::WeakSupport
                );
                RelationshipLabel::WeakSupport
            }
        }
    }

    /// Classify every candidate and split them, keeping input order within each side
    pub async fn partition(
        &self,
        claim: &Claim,
        candidates: Vec<VerseCandidate>,
    ) -> ClassifiedCandidates {
        let labelled: Vec<(VerseCandidate, RelationshipLabel)> = stream::iter(candidates)
            .map(|candidate| async move {
                let label = self.classify(claim, &candidate).await;
                (candidate, label)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut classified = ClassifiedCandidates::default();
        for (candidate, label) in labelled {
            match label {
                RelationshipLabel::Supported => classified.supported.push(candidate),
                RelationshipLabel::Contradicted => classified.contradicted.push(candidate),
                RelationshipLabel::WeakSupport => classified.weak_support += 1,
            }
        }

        info!(
            supported = classified.supported.len(),
            contradicted = classified.contradicted.len(),
            weak_support = classified.weak_support,
            "Partitioned candidates"
        );

        classified
    }
}
