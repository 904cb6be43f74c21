//! Hadith Validator
//!
//! Checks a hadith claim against Quranic verses:
//! - Embeds the claim and retrieves candidate verses from a vector index
//! - Filters candidates with an LLM relevance judge
//! - Classifies each survivor as support or contradiction
//! - Synthesizes a single verdict with confidence and summary

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::IndexBackend;
use domain::{
    EmbeddingClient, EmbeddingProvider, LlmProvider, RelationshipClassifier, RelevanceFilter,
    VerdictSynthesizer, VerseIndex,
};
use infrastructure::{
    embedding::{OpenAiEmbeddingProvider, ResilientEmbeddingProvider},
    judge::{JudgeModel, LlmLabelJudge, LlmScoreJudge, LlmVerdictJudge},
    llm::{HttpClient, OpenAiProvider, ResilientLlmProvider},
    services::ValidationOrchestrator,
    verse_index::{QdrantVerseIndex, SnapshotVerseIndex},
};

/// Wire every pipeline collaborator from configuration
pub fn build_orchestrator(config: &AppConfig) -> anyhow::Result<ValidationOrchestrator> {
    config.check()?;
    config.require_api_keys()?;

    let prompts = config.prompts.compile()?;
    let guard = config.resilience.call_guard();
    let providers = &config.providers;
    let pipeline = &config.pipeline;

    // Embedding and judge calls share one connection pool
    let http = HttpClient::new();

    let embedding_provider: Arc<dyn EmbeddingProvider> =
        Arc::new(OpenAiEmbeddingProvider::with_base_url(
            http.clone(),
            providers.embedding_api_key.as_str(),
            providers.base_url.as_str(),
        ));
    if let Some(native) = embedding_provider.dimensions(&providers.embedding_model) {
        if native != providers.embedding_dimensions {
            warn!(
                model = %providers.embedding_model,
                native,
                configured = providers.embedding_dimensions,
                "Configured embedding dimensions differ from the model default"
            );
        }
    }
    let embedder = EmbeddingClient::new(
        Arc::new(ResilientEmbeddingProvider::new(embedding_provider, guard.clone())),
        providers.embedding_model.as_str(),
    )
    .with_expected_dimensions(providers.embedding_dimensions);

    let llm: Arc<dyn LlmProvider> = Arc::new(ResilientLlmProvider::new(
        Arc::new(OpenAiProvider::with_base_url(
            http,
            providers.judge_api_key.as_str(),
            providers.base_url.as_str(),
        )),
        guard,
    ));
    let model = JudgeModel::new(llm, providers.judge_model.as_str())
        .with_temperature(providers.judge_temperature)
        .with_structured_output(providers.structured_output);

    let filter = RelevanceFilter::new(Arc::new(LlmScoreJudge::new(
        model.clone(),
        prompts.relevance,
    )))
    .with_threshold(pipeline.relevance_threshold)
    .with_max_concurrency(pipeline.max_concurrency);

    let classifier = RelationshipClassifier::new(Arc::new(
        LlmLabelJudge::new(model.clone(), prompts.relationship)
            .with_neutral_label(pipeline.neutral_label.as_str()),
    ))
    .with_max_concurrency(pipeline.max_concurrency);

    let synthesizer =
        VerdictSynthesizer::new(Arc::new(LlmVerdictJudge::new(model, prompts.verdict)));

    let index = build_verse_index(config)?;

    info!(
        index = index.index_name(),
        embedding_model = %providers.embedding_model,
        judge_model = %providers.judge_model,
        "Validation pipeline ready"
    );

    Ok(
        ValidationOrchestrator::new(embedder, index, filter, classifier, synthesizer)
            .with_policy(pipeline.policy()),
    )
}

/// Build the configured verse index
pub fn build_verse_index(config: &AppConfig) -> anyhow::Result<Arc<dyn VerseIndex>> {
    let index = &config.index;

    let built: Arc<dyn VerseIndex> = match index.backend {
        IndexBackend::Qdrant => {
            let http = HttpClient::with_timeout(index.timeout())?;
            Arc::new(
                QdrantVerseIndex::new(http, index.url.as_str(), index.collection.as_str())
                    .with_api_key(index.api_key.as_str()),
            )
        }
        IndexBackend::Snapshot => {
            let path = index
                .snapshot_path
                .as_ref()
                .context("index.snapshot_path is required for the snapshot backend")?;
            let snapshot = SnapshotVerseIndex::load(path)
                .with_context(|| format!("Failed to load verse snapshot {}", path.display()))?;
            Arc::new(snapshot)
        }
    };

    Ok(built)
}
