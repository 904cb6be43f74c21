//! Canonical claim text and its upstream extraction

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

/// Canonical text of the assertion under validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Narrator chain and body split out of raw hadith text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClaim {
    pub narrators: Vec<String>,
    pub claim: Claim,
}

/// Splits raw hadith text into narrators and canonical claim text
pub trait ClaimExtractor: Send + Sync + Debug {
    fn extract(&self, raw: &str) -> ExtractedClaim;
}

/// Treats the whole input as the claim and reports no narrators
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughClaimExtractor;

impl ClaimExtractor for PassthroughClaimExtractor {
    fn extract(&self, raw: &str) -> ExtractedClaim {
        ExtractedClaim {
            narrators: Vec::new(),
            claim: Claim::new(raw.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_trims() {
        let extracted = PassthroughClaimExtractor.extract("  charity erases sin \n");

        assert_eq!(extracted.claim.as_str(), "charity erases sin");
        assert!(extracted.narrators.is_empty());
    }

    #[test]
    fn test_blank_claim() {
        assert!(Claim::new(" \t\n").is_blank());
        assert!(!Claim::new("a").is_blank());
    }
}
