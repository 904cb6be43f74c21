//! Validation output

use serde::{Deserialize, Serialize};

use crate::domain::judge::{Verdict, VerdictTag};
use crate::domain::verse::VerseCandidate;

/// Everything a successful run returns to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub hadith: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub narrators: Vec<String>,
    pub verdict: VerdictTag,
    pub summary: String,
    pub confidence: f64,
    pub supported: Vec<VerseCandidate>,
    pub contradicted: Vec<VerseCandidate>,
}

impl ValidationResult {
    pub fn new(
        hadith: impl Into<String>,
        narrators: Vec<String>,
        verdict: Verdict,
        supported: Vec<VerseCandidate>,
        contradicted: Vec<VerseCandidate>,
    ) -> Self {
        Self {
            hadith: hadith.into(),
            narrators,
            verdict: verdict.verdict,
            summary: verdict.summary,
            confidence: verdict.confidence,
            supported,
            contradicted,
        }
    }
}

/// Wire envelope: `{"results": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub results: ValidationResult,
}

impl From<ValidationResult> for ValidationResponse {
    fn from(results: ValidationResult) -> Self {
        Self { results }
    }
}
