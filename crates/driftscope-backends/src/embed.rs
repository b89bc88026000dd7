// crates/driftscope-backends/src/embed.rs
//
// HTTP client for a sentence-embedding endpoint.
//
// POSTs {inputs} and reads the embedding vector. Servers differ on
// whether they return a flat vector or a one-element batch; both
// shapes are accepted. Errors here are fatal to a run: embeddings are
// load-bearing and have no fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use driftscope_core::{DriftError, EmbeddingBackend};

/// Request envelope for the embedding endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    pub inputs: String,
}

/// Response shapes seen from embedding servers: a flat vector or a
/// batch of vectors (one per input; we send exactly one).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmbedResponse {
    Flat(Vec<f32>),
    Batch(Vec<Vec<f32>>),
}

impl EmbedResponse {
    fn into_vector(self) -> Result<Vec<f32>, DriftError> {
        match self {
            EmbedResponse::Flat(v) => Ok(v),
            EmbedResponse::Batch(mut batch) => {
                if batch.len() == 1 {
                    Ok(batch.remove(0))
                } else {
                    Err(DriftError::Embedding(format!(
                        "expected one embedding, got {}",
                        batch.len()
                    )))
                }
            }
        }
    }
}

/// Embedding backend speaking a JSON embed API.
pub struct HttpEmbedding {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpEmbedding {
    /// `endpoint` is the full embed URL, e.g.
    /// `http://localhost:8080/embed`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingBackend for HttpEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DriftError> {
        let request = EmbedRequest {
            inputs: text.to_string(),
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| DriftError::Embedding(format!("request to {} failed: {}", self.endpoint, e)))?;

        if !resp.status().is_success() {
            return Err(DriftError::Embedding(format!(
                "{} returned HTTP {}",
                self.endpoint,
                resp.status()
            )));
        }

        let body: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| DriftError::Embedding(format!("malformed response: {}", e)))?;

        let vector = body.into_vector()?;
        if vector.is_empty() {
            return Err(DriftError::Embedding("server returned an empty vector".to_string()));
        }

        Ok(vector)
    }
}
