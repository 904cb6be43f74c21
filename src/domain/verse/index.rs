//! Verse index trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::VerseCandidate;
use crate::domain::embedding::EmbeddingVector;
use crate::domain::DomainError;

/// Default number of candidates retrieved per query
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 15;

/// Read-only similarity search over precomputed verse vectors
#[async_trait]
pub trait VerseIndex: Send + Sync + Debug {
    /// Return at most `limit` candidates ordered by descending similarity.
    /// Fails with `DomainError::IndexUnavailable` when the index cannot be reached.
    async fn search(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<VerseCandidate>, DomainError>;

    /// Check reachability without querying the index
    async fn health_check(&self) -> Result<(), DomainError>;

    fn index_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    pub struct MockVerseIndex {
        candidates: Vec<VerseCandidate>,
        error: Option<DomainError>,
        calls: AtomicUsize,
        limits: Mutex<Vec<usize>>,
    }

    impl MockVerseIndex {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_candidates(mut self, candidates: Vec<VerseCandidate>) -> Self {
            self.candidates = candidates;
            self
        }

        pub fn with_error(mut self, error: DomainError) -> Self {
            self.error = Some(error);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// `limit` of every search received, in call order
        pub fn limits(&self) -> Vec<usize> {
            self.limits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VerseIndex for MockVerseIndex {
        async fn search(
            &self,
            _vector: &EmbeddingVector,
            limit: usize,
        ) -> Result<Vec<VerseCandidate>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.limits.lock().unwrap().push(limit);

            if let Some(ref error) = self.error {
                return Err(error.clone());
            }

            Ok(self.candidates.iter().take(limit).cloned().collect())
        }

        async fn health_check(&self) -> Result<(), DomainError> {
            match self.error {
                Some(ref error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn index_name(&self) -> &'static str {
            "mock"
        }
    }
}
