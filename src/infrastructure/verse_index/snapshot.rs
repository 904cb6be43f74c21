//! In-memory verse index loaded from a JSON snapshot

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::embedding::EmbeddingVector;
use crate::domain::verse::{VerseCandidate, VerseIndex, VersePayload};
use crate::domain::DomainError;

/// One stored verse and its vector
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRecord {
    pub vector: Vec<f32>,
    #[serde(flatten)]
    pub payload: VersePayload,
}

/// Exhaustive cosine search over a fixed set of verses
#[derive(Debug)]
pub struct SnapshotVerseIndex {
    records: Vec<SnapshotRecord>,
    dimensions: usize,
}

impl SnapshotVerseIndex {
    pub fn from_records(records: Vec<SnapshotRecord>) -> Result<Self, DomainError> {
        let dimensions = records.first().map(|r| r.vector.len()).unwrap_or(0);

        if let Some((position, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.vector.len() != dimensions)
        {
            return Err(DomainError::validation(format!(
                "Snapshot record {} ({} {}) has {} dimensions, expected {}",
                position,
                record.payload.surah_name_english,
                record.payload.aya_number,
                record.vector.len(),
                dimensions
            )));
        }

        Ok(Self {
            records,
            dimensions,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let records: Vec<SnapshotRecord> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("Invalid verse snapshot: {}", e)))?;

        Self::from_records(records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::index_unavailable(format!(
                "Failed to read verse snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        let index = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            verses = index.len(),
            dimensions = index.dimensions,
            "Loaded verse snapshot"
        );

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl VerseIndex for SnapshotVerseIndex {
    async fn search(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<VerseCandidate>, DomainError> {
        if !self.is_empty() && vector.dimensions() != self.dimensions {
            return Err(DomainError::validation(format!(
                "Query vector has {} dimensions, snapshot stores {}",
                vector.dimensions(),
                self.dimensions
            )));
        }

        let mut candidates: Vec<VerseCandidate> = self
            .records
            .iter()
            .map(|record| {
                let score = vector.cosine_similarity(&record.vector);
                record.payload.clone().into_candidate(score)
            })
            .collect();

        // Stable sort keeps snapshot order among equal scores
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(limit);

        debug!(hits = candidates.len(), limit, "Snapshot search completed");

        Ok(candidates)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::index_unavailable("Verse snapshot is empty"));
        }
        Ok(())
    }

    fn index_name(&self) -> &'static str {
        "snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"vector": [1.0, 0.0], "english_translation": "east", "surah_name_english": "A", "aya_number": 1},
        {"vector": [0.0, 1.0], "english_translation": "north", "surah_name_english": "A", "aya_number": 2, "arabic_diacritics": "شمال"},
        {"vector": [1.0, 0.0], "english_translation": "east again", "surah_name_english": "B", "aya_number": 3},
        {"vector": [-1.0, 0.0], "english_translation": "west", "surah_name_english": "B", "aya_number": 4}
    ]"#;

    #[tokio::test]
    async fn test_search_orders_by_similarity_with_stable_ties() {
        let index = SnapshotVerseIndex::from_json(SNAPSHOT).unwrap();

        let candidates = index
            .search(&EmbeddingVector::new(vec![1.0, 0.1]), 15)
            .await
            .unwrap();

        let ayahs: Vec<u32> = candidates.iter().map(|c| c.aya_number).collect();
        assert_eq!(ayahs, vec![1, 3, 2, 4]);
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_limit_bounds_results() {
        let index = SnapshotVerseIndex::from_json(SNAPSHOT).unwrap();

        let candidates = index
            .search(&EmbeddingVector::new(vec![0.0, 1.0]), 2)
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].arabic_diacritics, "شمال");
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let index = SnapshotVerseIndex::from_json(SNAPSHOT).unwrap();

        let result = index.search(&EmbeddingVector::new(vec![1.0, 0.0, 0.0]), 15).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_inconsistent_records_are_rejected() {
        let json = r#"[
            {"vector": [1.0, 0.0], "english_translation": "a", "surah_name_english": "A", "aya_number": 1},
            {"vector": [1.0], "english_translation": "b", "surah_name_english": "A", "aya_number": 2}
        ]"#;

        assert!(SnapshotVerseIndex::from_json(json).is_err());
    }

    #[tokio::test]
    async fn test_empty_snapshot_is_unhealthy() {
        let index = SnapshotVerseIndex::from_json("[]").unwrap();

        assert!(index.health_check().await.is_err());
        assert!(index
            .search(&EmbeddingVector::new(vec![1.0]), 5)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_file_is_index_unavailable() {
        let result = SnapshotVerseIndex::load("/nonexistent/verses.json");
        assert!(matches!(result, Err(DomainError::IndexUnavailable { .. })));
    }
}
