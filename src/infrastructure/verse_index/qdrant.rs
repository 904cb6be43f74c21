//! Qdrant REST verse index

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::embedding::EmbeddingVector;
use crate::domain::verse::{VerseCandidate, VerseIndex, VersePayload};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

pub const DEFAULT_COLLECTION: &str = "quran_embeddings";

/// Queries a Qdrant collection whose payloads carry verse fields
#[derive(Debug)]
pub struct QdrantVerseIndex<C: HttpClientTrait> {
    client: C,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

impl<C: HttpClientTrait> QdrantVerseIndex<C> {
    pub fn new(client: C, base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn search_url(&self) -> String {
        format!("{}/points/search", self.collection_url())
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref key) = self.api_key {
            headers.push(("api-key", key.as_str()));
        }
        headers
    }

    fn parse_hits(&self, json: serde_json::Value) -> Result<Vec<VerseCandidate>, DomainError> {
        let response: QdrantSearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::index_unavailable(format!("Malformed Qdrant search response: {}", e))
        })?;

        let candidates = response
            .result
            .into_iter()
            .filter_map(|hit| {
                let payload = hit.payload.unwrap_or(serde_json::Value::Null);
                match serde_json::from_value::<VersePayload>(payload) {
                    Ok(payload) => Some(payload.into_candidate(hit.score)),
                    Err(e) => {
                        warn!(point_id = %hit.id, error = %e, "Skipping point with incomplete verse payload");
                        None
                    }
                }
            })
            .collect();

        Ok(candidates)
    }
}

#[async_trait]
impl<C: HttpClientTrait> VerseIndex for QdrantVerseIndex<C> {
    async fn search(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<VerseCandidate>, DomainError> {
        let body = serde_json::json!({
            "vector": vector.as_slice(),
            "limit": limit,
            "with_payload": true,
        });

        let response = self
            .client
            .post_json(&self.search_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::index_unavailable(format!("Qdrant search failed: {}", e)))?;

        let mut candidates = self.parse_hits(response)?;
        candidates.truncate(limit);

        debug!(
            collection = %self.collection,
            hits = candidates.len(),
            limit,
            "Qdrant search completed"
        );

        Ok(candidates)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.client
            .get_json(&self.collection_url(), self.headers())
            .await
            .map(|_| ())
            .map_err(|e| {
                DomainError::index_unavailable(format!(
                    "Qdrant collection '{}' unreachable: {}",
                    self.collection, e
                ))
            })
    }

    fn index_name(&self) -> &'static str {
        "qdrant"
    }
}

#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    result: Vec<QdrantScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct QdrantScoredPoint {
    id: serde_json::Value,
    score: f32,
    payload: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const SEARCH_URL: &str = "http://qdrant:6333/collections/quran_embeddings/points/search";
    const COLLECTION_URL: &str = "http://qdrant:6333/collections/quran_embeddings";

    fn hit(id: u64, score: f32, aya: u32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "version": 1,
            "score": score,
            "payload": {
                "english_translation": format!("translation {}", aya),
                "surah_name_english": "Al-Baqarah",
                "aya_number": aya,
                "arabic_diacritics": "بِسْمِ"
            }
        })
    }

    fn index(client: MockHttpClient) -> QdrantVerseIndex<MockHttpClient> {
        QdrantVerseIndex::new(client, "http://qdrant:6333/", DEFAULT_COLLECTION).with_api_key("secret")
    }

    #[tokio::test]
    async fn test_search_preserves_index_order() {
        let response = serde_json::json!({
            "result": [hit(1, 0.91, 271), hit(2, 0.85, 272), hit(3, 0.40, 3)],
            "status": "ok",
            "time": 0.002
        });
        let index = index(MockHttpClient::new().with_response(SEARCH_URL, response));

        let candidates = index
            .search(&EmbeddingVector::new(vec![0.1, 0.2]), 15)
            .await
            .unwrap();

        let scores: Vec<f32> = candidates.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![0.91, 0.85, 0.40]);
        assert_eq!(candidates[0].aya_number, 271);
        assert_eq!(candidates[0].arabic_diacritics, "بِسْمِ");
    }

    #[tokio::test]
    async fn test_search_request_shape() {
        let response = serde_json::json!({"result": []});
        let index = index(MockHttpClient::new().with_response(SEARCH_URL, response));

        index
            .search(&EmbeddingVector::new(vec![0.5, -0.5]), 15)
            .await
            .unwrap();

        let requests = index.client.requests();
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["limit"], 15);
        assert_eq!(body["with_payload"], true);
        assert_eq!(body["vector"], serde_json::json!([0.5, -0.5]));
        assert!(requests[0]
            .headers
            .contains(&("api-key".to_string(), "secret".to_string())));
    }

    #[tokio::test]
    async fn test_incomplete_payload_is_skipped() {
        let response = serde_json::json!({
            "result": [
                hit(1, 0.9, 1),
                {"id": 2, "score": 0.8, "payload": {"surah_name_english": "Hud"}},
                {"id": 3, "score": 0.7},
                hit(4, 0.6, 4)
            ]
        });
        let index = index(MockHttpClient::new().with_response(SEARCH_URL, response));

        let candidates = index
            .search(&EmbeddingVector::new(vec![0.1]), 15)
            .await
            .unwrap();

        let ayahs: Vec<u32> = candidates.iter().map(|c| c.aya_number).collect();
        assert_eq!(ayahs, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_index_unavailable() {
        let index = index(MockHttpClient::new().with_error(SEARCH_URL, "connection refused"));

        let result = index.search(&EmbeddingVector::new(vec![0.1]), 15).await;

        assert!(matches!(result, Err(DomainError::IndexUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_health_check() {
        let healthy = index(
            MockHttpClient::new()
                .with_response(COLLECTION_URL, serde_json::json!({"result": {"status": "green"}})),
        );
        assert!(healthy.health_check().await.is_ok());

        let unhealthy = index(MockHttpClient::new().with_error(COLLECTION_URL, "404"));
        assert!(matches!(
            unhealthy.health_check().await,
            Err(DomainError::IndexUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_api_key_is_not_sent() {
        let index = QdrantVerseIndex::new(MockHttpClient::new(), "http://qdrant:6333", "c")
            .with_api_key("");

        assert_eq!(index.headers().len(), 1);
    }
}
