use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::domain::judge::{JudgePrompts, RelationshipLabel, DEFAULT_NEUTRAL_LABEL};
use crate::domain::validation::{DEFAULT_MAX_CONCURRENCY, DEFAULT_RELEVANCE_THRESHOLD};
use crate::domain::verse::DEFAULT_RETRIEVAL_LIMIT;
use crate::domain::DomainError;
use crate::infrastructure::judge::StructuredOutput;
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;
use crate::infrastructure::resilience::{CallGuard, RetryPolicy};
use crate::infrastructure::services::ValidationPolicy;
use crate::infrastructure::verse_index::DEFAULT_COLLECTION;

/// Plain environment variables read as defaults, overridden by files and `APP__*`
const LEGACY_ENV_DEFAULTS: &[(&str, &str)] = &[
    ("providers.embedding_api_key", "OPENAI_API_KEY"),
    ("providers.judge_api_key", "OPENAI_API_KEY"),
    ("index.url", "QDRANT_URL"),
    ("index.api_key", "QDRANT_API_KEY"),
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub providers: ProvidersConfig,
    #[validate(nested)]
    pub index: IndexConfig,
    #[validate(nested)]
    pub pipeline: PipelineConfig,
    #[validate(nested)]
    pub resilience: ResilienceConfig,
    pub prompts: JudgePrompts,
    pub logging: LoggingConfig,
}

/// Embedding and judge model providers
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ProvidersConfig {
    pub embedding_api_key: String,
    pub judge_api_key: String,
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub embedding_model: String,
    #[validate(range(min = 1))]
    pub embedding_dimensions: usize,
    #[validate(length(min = 1))]
    pub judge_model: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub judge_temperature: f32,
    pub structured_output: StructuredOutput,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            embedding_api_key: String::new(),
            judge_api_key: String::new(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            embedding_dimensions: 1536,
            judge_model: "gpt-3.5-turbo".to_string(),
            judge_temperature: 0.0,
            structured_output: StructuredOutput::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    #[default]
    Qdrant,
    Snapshot,
}

/// Verse index location
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct IndexConfig {
    pub backend: IndexBackend,
    #[validate(url)]
    pub url: String,
    pub api_key: String,
    #[validate(range(min = 1, max = 600))]
    pub timeout_seconds: u64,
    #[validate(length(min = 1))]
    pub collection: String,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: IndexBackend::default(),
            url: "http://localhost:6333".to_string(),
            api_key: String::new(),
            timeout_seconds: 30,
            collection: DEFAULT_COLLECTION.to_string(),
            snapshot_path: None,
        }
    }
}

impl IndexConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Pipeline knobs
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct PipelineConfig {
    #[validate(range(min = 1, max = 100))]
    pub retrieval_limit: usize,
    #[validate(range(min = 1, max = 10))]
    pub relevance_threshold: u8,
    #[validate(range(min = 1, max = 64))]
    pub max_concurrency: usize,
    #[validate(length(min = 1))]
    pub neutral_label: String,
    pub reject_blank_claims: bool,
    /// 0 disables the run deadline
    pub run_deadline_seconds: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            neutral_label: DEFAULT_NEUTRAL_LABEL.to_string(),
            reject_blank_claims: true,
            run_deadline_seconds: 180,
        }
    }
}

impl PipelineConfig {
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            retrieval_limit: self.retrieval_limit,
            reject_blank_claims: self.reject_blank_claims,
            run_deadline: (self.run_deadline_seconds > 0)
                .then(|| Duration::from_secs(self.run_deadline_seconds)),
        }
    }
}

/// Timeouts and retries for embedding and judge calls
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ResilienceConfig {
    /// 0 disables the per-call timeout
    pub call_timeout_seconds: u64,
    #[validate(nested)]
    pub retry: RetryPolicy,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            call_timeout_seconds: 60,
            retry: RetryPolicy::default(),
        }
    }
}

impl ResilienceConfig {
    pub fn call_guard(&self) -> CallGuard {
        let timeout = (self.call_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.call_timeout_seconds));
        CallGuard::new(self.retry.clone(), timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        for (key, var) in LEGACY_ENV_DEFAULTS {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name("config/local").required(false))
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Field rules, prompt variables and backend requirements.
    /// API keys are checked separately by [`AppConfig::require_api_keys`].
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::configuration(format!("Invalid configuration: {}", e)))?;

        self.prompts
            .compile()
            .map_err(|e| DomainError::configuration(format!("Invalid prompt: {}", e)))?;

        let neutral = self.pipeline.neutral_label.trim();
        let reserved = [RelationshipLabel::Supported, RelationshipLabel::Contradicted];
        if let Some(label) = reserved
            .iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(neutral))
        {
            return Err(DomainError::configuration(format!(
                "pipeline.neutral_label must differ from the {} label",
                label
            )));
        }

        if self.index.backend == IndexBackend::Snapshot && self.index.snapshot_path.is_none() {
            return Err(DomainError::configuration(
                "index.snapshot_path is required for the snapshot backend",
            ));
        }

        Ok(())
    }

    pub fn require_api_keys(&self) -> Result<(), DomainError> {
        if self.providers.embedding_api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "providers.embedding_api_key is not set (or OPENAI_API_KEY)",
            ));
        }
        if self.providers.judge_api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "providers.judge_api_key is not set (or OPENAI_API_KEY)",
            ));
        }
        Ok(())
    }
}
