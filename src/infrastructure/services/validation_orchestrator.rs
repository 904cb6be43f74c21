//! Validation orchestrator - runs the staged hadith validation pipeline

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::embedding::EmbeddingClient;
use crate::domain::validation::{
    ClaimExtractor, PassthroughClaimExtractor, PipelineStage, RelationshipClassifier,
    RelevanceFilter, ValidationError, ValidationResult, VerdictSynthesizer,
};
use crate::domain::verse::{dedupe_by_key, VerseIndex, DEFAULT_RETRIEVAL_LIMIT};
use crate::domain::DomainError;
use crate::infrastructure::observability::{
    record_relationship_labels, record_relevance, record_stage_duration, record_validation_run,
};

/// Run-level knobs
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    pub retrieval_limit: usize,
    pub reject_blank_claims: bool,
    /// Overall budget for one run; `None` disables it
    pub run_deadline: Option<Duration>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            reject_blank_claims: true,
            run_deadline: Some(Duration::from_secs(180)),
        }
    }
}

/// Sequences extraction, embedding, retrieval, filtering, classification
/// and synthesis. Holds no per-run state, so runs may execute concurrently.
pub struct ValidationOrchestrator {
    extractor: Arc<dyn ClaimExtractor>,
    embedder: EmbeddingClient,
    index: Arc<dyn VerseIndex>,
    filter: RelevanceFilter,
    classifier: RelationshipClassifier,
    synthesizer: VerdictSynthesizer,
    policy: ValidationPolicy,
}

impl ValidationOrchestrator {
    pub fn new(
        embedder: EmbeddingClient,
        index: Arc<dyn VerseIndex>,
        filter: RelevanceFilter,
        classifier: RelationshipClassifier,
        synthesizer: VerdictSynthesizer,
    ) -> Self {
        Self {
            extractor: Arc::new(PassthroughClaimExtractor),
            embedder,
            index,
            filter,
            classifier,
            synthesizer,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ClaimExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn index_name(&self) -> &'static str {
        self.index.index_name()
    }

    /// Check that the verse index is reachable
    pub async fn check_index(&self) -> Result<(), DomainError> {
        self.index.health_check().await
    }

    /// Validate one raw hadith text
    pub async fn validate(&self, raw: &str) -> Result<ValidationResult, ValidationError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("validation_run", %run_id);
        let started = Instant::now();

        let result = self.run(raw).instrument(span).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        record_validation_run(outcome, started.elapsed());

        result
    }

    async fn run(&self, raw: &str) -> Result<ValidationResult, ValidationError> {
        let deadline = self.policy.run_deadline.map(|d| tokio::time::Instant::now() + d);

        let extracted = self.extractor.extract(raw);
        let claim = extracted.claim;
        if claim.is_blank() {
            if self.policy.reject_blank_claims {
                warn!("Rejecting blank claim before any external call");
                return Err(ValidationError::InvalidInput(
                    "claim text is empty".to_string(),
                ));
            }
            warn!("Claim text is blank, running the pipeline anyway");
        }
        info!(
            narrators = extracted.narrators.len(),
            claim_chars = claim.as_str().chars().count(),
            "Claim extracted"
        );

        let vector = self
            .stage(PipelineStage::Embedded, deadline, self.embedder.embed(claim.as_str()))
            .await?;

        let candidates = self
            .stage(
                PipelineStage::Retrieved,
                deadline,
                self.index.search(&vector, self.policy.retrieval_limit),
            )
            .await?;
        let retrieved = candidates.len();
        let candidates = dedupe_by_key(candidates);
        if candidates.len() < retrieved {
            debug!(
                duplicates = retrieved - candidates.len(),
                "Dropped repeated verses from retrieval"
            );
        }
        info!(candidates = candidates.len(), "Candidates retrieved");

        let total = candidates.len();
        let filtered = self
            .stage(PipelineStage::Filtered, deadline, async {
                Ok(self.filter.filter(&claim, candidates).await)
            })
            .await?;
        record_relevance(filtered.len(), total);

        let classified = self
            .stage(PipelineStage::Classified, deadline, async {
                Ok(self.classifier.partition(&claim, filtered).await)
            })
            .await?;
        record_relationship_labels(&classified);

        let verdict = self
            .stage(
                PipelineStage::Verdicted,
                deadline,
                self.synthesizer
                    .synthesize(&claim, &classified.supported, &classified.contradicted),
            )
            .await?;

        info!(
            verdict = %verdict.verdict,
            confidence = verdict.confidence,
            supported = classified.supported.len(),
            contradicted = classified.contradicted.len(),
            "Validation completed"
        );

        Ok(ValidationResult::new(
            claim.into_inner(),
            extracted.narrators,
            verdict,
            classified.supported,
            classified.contradicted,
        ))
    }

    /// Await one stage against the run deadline
    async fn stage<T, F>(
        &self,
        stage: PipelineStage,
        deadline: Option<tokio::time::Instant>,
        work: F,
    ) -> Result<T, ValidationError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        let started = Instant::now();

        let result = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, work).await {
                Ok(result) => result,
                Err(_) => {
                    let deadline_ms = self
                        .policy
                        .run_deadline
                        .map(|d| d.as_millis() as u64)
                        .unwrap_or_default();
                    record_stage_duration(stage, started.elapsed());
                    warn!(stage = stage.as_str(), deadline_ms, "Run deadline exceeded");
                    return Err(ValidationError::DeadlineExceeded { stage, deadline_ms });
                }
            },
            None => work.await,
        };

        record_stage_duration(stage, started.elapsed());

        result.map_err(|source| {
            warn!(stage = stage.as_str(), error = %source, "Stage failed");
            ValidationError::stage_failed(stage, source)
        })
    }
}
