//! Final verdict synthesis

use std::sync::Arc;

use tracing::info;

use super::Claim;
use crate::domain::judge::{Verdict, VerdictJudge};
use crate::domain::verse::VerseCandidate;
use crate::domain::DomainError;

/// Render a list of verses as judge evidence; `None` when empty
pub fn render_evidence(candidates: &[VerseCandidate]) -> String {
    if candidates.is_empty() {
        return "None".to_string();
    }

    candidates
        .iter()
        .map(|c| {
            format!(
                "→ Score: {:.2}\n- English: \"{}\"\n- Arabic: {}\n- Surah: {}, Ayah: {}",
                c.score, c.english_translation, c.arabic_diacritics, c.surah_name_english, c.aya_number
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Clone)]
pub struct VerdictSynthesizer {
    judge: Arc<dyn VerdictJudge>,
}

impl VerdictSynthesizer {
    pub fn new(judge: Arc<dyn VerdictJudge>) -> Self {
        Self { judge }
    }

    /// One judge call over the final partitions. Failures propagate.
    pub async fn synthesize(
        &self,
        claim: &Claim,
        supported: &[VerseCandidate],
        contradicted: &[VerseCandidate],
    ) -> Result<Verdict, DomainError> {
        let verdict = self
            .judge
            .judge(claim.as_str(), supported, contradicted)
            .await?;

        info!(
            verdict = %verdict.verdict,
            confidence = verdict.confidence,
            supported = supported.len(),
            contradicted = contradicted.len(),
            "Synthesized verdict"
        );

        Ok(verdict)
    }
}
