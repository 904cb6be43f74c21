//! Validation pipeline metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder every
//! call is a no-op.

use std::time::Duration;

use metrics::{counter, gauge, histogram};

use crate::domain::judge::RelationshipLabel;
use crate::domain::validation::{ClassifiedCandidates, PipelineStage};

/// Publish the crate version as a gauge
pub fn register_build_info() {
    gauge!("hadith_validator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

pub fn record_validation_run(outcome: &'static str, duration: Duration) {
    counter!("validation_runs_total", "outcome" => outcome).increment(1);
    histogram!("validation_run_duration_seconds", "outcome" => outcome)
        .record(duration.as_secs_f64());
}

pub fn record_stage_duration(stage: PipelineStage, duration: Duration) {
    histogram!("validation_stage_duration_seconds", "stage" => stage.as_str())
        .record(duration.as_secs_f64());
}

/// Judge call outcome labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeCallStatus {
    Success,
    ParseError,
    ProviderError,
}

impl JudgeCallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ParseError => "parse_error",
            Self::ProviderError => "provider_error",
        }
    }
}

pub fn record_judge_call(judge: &'static str, status: JudgeCallStatus) {
    counter!("judge_calls_total", "judge" => judge, "status" => status.as_str()).increment(1);
}

pub fn record_relevance(kept: usize, total: usize) {
    counter!("relevance_candidates_total", "outcome" => "kept").increment(kept as u64);
    counter!("relevance_candidates_total", "outcome" => "dropped")
        .increment(total.saturating_sub(kept) as u64);
}

pub fn record_relationship_labels(classified: &ClassifiedCandidates) {
    let counts = [
        (RelationshipLabel::Supported, classified.supported.len()),
        (RelationshipLabel::Contradicted, classified.contradicted.len()),
        (RelationshipLabel::WeakSupport, classified.weak_support),
    ];

    for (label, count) in counts {
        counter!("relationship_labels_total", "label" => label.as_str()).increment(count as u64);
    }
}
