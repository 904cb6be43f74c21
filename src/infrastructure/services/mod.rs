//! Infrastructure services

mod validation_orchestrator;

pub use validation_orchestrator::{ValidationOrchestrator, ValidationPolicy};
