//! Judge outcomes: relationship labels and the final verdict

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::DomainError;

/// Label used for the neutral relationship unless configured otherwise
pub const DEFAULT_NEUTRAL_LABEL: &str = "Weak Support";

/// Relationship between a claim and one verse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipLabel {
    Supported,
    #[serde(rename = "Weak Support")]
    WeakSupport,
    Contradicted,
}

impl RelationshipLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "Supported",
            Self::WeakSupport => DEFAULT_NEUTRAL_LABEL,
            Self::Contradicted => "Contradicted",
        }
    }

    /// Map a judge's label text, where the neutral label's wording is configurable
    pub fn from_judge_label(label: &str, neutral_label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("Supported") {
            Some(Self::Supported)
        } else if label.eq_ignore_ascii_case("Contradicted") {
            Some(Self::Contradicted)
        } else if label.eq_ignore_ascii_case(neutral_label.trim()) {
            Some(Self::WeakSupport)
        } else {
            None
        }
    }
}

impl fmt::Display for RelationshipLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictTag {
    Valid,
    Invalid,
    Unknown,
}

impl VerdictTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VerdictTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final adjudication of a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub verdict: VerdictTag,
    /// Always within [0, 1]
    pub confidence: f64,
    pub summary: String,
}

impl Verdict {
    /// Build a verdict from judge output. Non-finite confidence is rejected,
    /// out-of-range confidence is clamped.
    pub fn new(
        verdict: VerdictTag,
        confidence: f64,
        summary: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !confidence.is_finite() {
            return Err(DomainError::judge_response(
                "verdict",
                format!("confidence must be a finite number, got {confidence}"),
            ));
        }

        let clamped = confidence.clamp(0.0, 1.0);
        if clamped != confidence {
            warn!(confidence, clamped, "Verdict confidence outside [0, 1], clamping");
        }

        Ok(Self {
            verdict,
            confidence: clamped,
            summary: summary.into(),
        })
    }
}
