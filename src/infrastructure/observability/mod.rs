//! Observability infrastructure - Metrics

mod metrics;

pub use metrics::{
    record_judge_call, record_relationship_labels, record_relevance, record_stage_duration,
    record_validation_run, register_build_info, JudgeCallStatus,
};
