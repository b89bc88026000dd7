// crates/driftscope-backends/src/translate.rs
//
// HTTP client for a LibreTranslate-compatible translation endpoint.
//
// POSTs {q, source, target, format} and reads {translatedText}. Any
// transport or protocol failure surfaces as DriftError::Translation;
// the translation step decides what to do with it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use driftscope_core::{DriftError, TranslationBackend};

/// Request envelope for the translation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
}

/// Response envelope from the translation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Translation backend speaking the LibreTranslate JSON API.
pub struct HttpTranslator {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTranslator {
    /// `endpoint` is the full translate URL, e.g.
    /// `http://localhost:5000/translate`.
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
impl TranslationBackend for HttpTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, DriftError>
    {
        let request = TranslateRequest {
            q: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            format: "text".to_string(),
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| DriftError::Translation(format!("request to {} failed: {}", self.endpoint, e)))?;

        if !resp.status().is_success() {
            return Err(DriftError::Translation(format!(
                "{} returned HTTP {}",
                self.endpoint,
                resp.status()
            )));
        }

        let body: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| DriftError::Translation(format!("malformed response: {}", e)))?;

        Ok(body.translated_text)
    }
}
