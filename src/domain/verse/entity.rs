//! Retrieved verse entities

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identity of a verse: surah name and ayah number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseKey {
    pub surah_name: String,
    pub aya_number: u32,
}

/// One retrieved verse with its similarity score for the current query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseCandidate {
    /// Similarity score as reported by the index (higher is more similar)
    pub score: f32,
    pub english_translation: String,
    pub surah_name_english: String,
    pub aya_number: u32,
    /// Arabic text with diacritics, empty when unavailable
    #[serde(default)]
    pub arabic_diacritics: String,
}

impl VerseCandidate {
    pub fn new(
        score: f32,
        english_translation: impl Into<String>,
        surah_name_english: impl Into<String>,
        aya_number: u32,
    ) -> Self {
        Self {
            score,
            english_translation: english_translation.into(),
            surah_name_english: surah_name_english.into(),
            aya_number,
            arabic_diacritics: String::new(),
        }
    }

    pub fn with_arabic(mut self, arabic_diacritics: impl Into<String>) -> Self {
        self.arabic_diacritics = arabic_diacritics.into();
        self
    }

    pub fn key(&self) -> VerseKey {
        VerseKey {
            surah_name: self.surah_name_english.clone(),
            aya_number: self.aya_number,
        }
    }

    /// Render the verse the way judges see it
    pub fn describe(&self) -> String {
        format!(
            "{} (Surah: {}, Ayah: {})",
            self.english_translation, self.surah_name_english, self.aya_number
        )
    }
}

/// Verse fields as stored alongside each vector in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersePayload {
    pub english_translation: String,
    pub surah_name_english: String,
    pub aya_number: u32,
    #[serde(default)]
    pub arabic_diacritics: String,
}

impl VersePayload {
    /// Attach a query-relative score
    pub fn into_candidate(self, score: f32) -> VerseCandidate {
        VerseCandidate {
            score,
            english_translation: self.english_translation,
            surah_name_english: self.surah_name_english,
            aya_number: self.aya_number,
            arabic_diacritics: self.arabic_diacritics,
        }
    }
}

/// Drop repeated verses, keeping the first hit for each key. Index results
/// arrive best-first, so the kept hit is the highest scored.
pub fn dedupe_by_key(candidates: Vec<VerseCandidate>) -> Vec<VerseCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.key()))
        .collect()
}
