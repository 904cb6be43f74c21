//! Per-candidate relevance filtering

use std::sync::Arc;

use futures::{future, stream, StreamExt};
use tracing::{debug, info, warn};

use super::Claim;
use crate::domain::judge::ScoreJudge;
use crate::domain::verse::VerseCandidate;

pub const MIN_RELEVANCE_SCORE: u8 = 1;
pub const MAX_RELEVANCE_SCORE: u8 = 10;
pub const DEFAULT_RELEVANCE_THRESHOLD: u8 = 7;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Keeps the candidates a judge scores at or above the threshold
#[derive(Clone)]
pub struct RelevanceFilter {
    judge: Arc<dyn ScoreJudge>,
    threshold: u8,
    max_concurrency: usize,
}

impl RelevanceFilter {
    pub fn new(judge: Arc<dyn ScoreJudge>) -> Self {
        Self {
            judge,
            threshold: DEFAULT_RELEVANCE_THRESHOLD,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Score every candidate and return the kept ones in input order.
    /// A candidate whose score cannot be obtained is skipped.
    pub async fn filter(&self, claim: &Claim, candidates: Vec<VerseCandidate>) -> Vec<VerseCandidate> {
        let total = candidates.len();
        let judge = self.judge.as_ref();
        let threshold = self.threshold;

        let kept: Vec<VerseCandidate> = stream::iter(candidates)
            .map(|candidate| async move {
                match judge.score(claim.as_str(), &candidate).await {
                    Ok(score) if (MIN_RELEVANCE_SCORE..=MAX_RELEVANCE_SCORE).contains(&score) => {
                        debug!(
                            surah = %candidate.surah_name_english,
                            ayah = candidate.aya_number,
                            score,
                            threshold,
                            "Scored candidate relevance"
                        );
                        (score >= threshold).then_some(candidate)
                    }
                    Ok(score) => {
                        warn!(
                            surah = %candidate.surah_name_english,
                            ayah = candidate.aya_number,
                            score,
                            "Relevance score out of range, skipping candidate"
                        );
                        None
                    }
                    Err(e) => {
                        warn!(
                            surah = %candidate.surah_name_english,
                            ayah = candidate.aya_number,
                            error = %e,
                            "Failed to score candidate, skipping"
                        );
                        None
                    }
                }
            })
            .buffered(self.max_concurrency)
            .filter_map(future::ready)
            .collect()
            .await;

        info!(total, kept = kept.len(), threshold, "Filtered candidates by relevance");

        kept
    }
}
