// crates/driftscope-core/src/traits.rs

use async_trait::async_trait;

use crate::error::DriftError;
use crate::record::DistanceRecord;

/// Trait for external machine-translation services.
///
/// Implemented by driftscope-backends (HTTP client) and by test stubs.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `source` to `target` (ISO language codes).
    ///
    /// Any service failure surfaces here as an error; the caller decides
    /// the fallback policy.
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, DriftError>;
}

/// Trait for sentence-embedding models.
///
/// Implemented by `HashEmbedding` (offline) and driftscope-backends
/// (HTTP client). Errors from this trait are fatal to a run: there is
/// no meaningful fallback for a missing embedding.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embed `text` into a fixed-dimension vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DriftError>;
}

/// Trait for the append-only results log.
///
/// Implemented by driftscope-store (CSV backend). Append failures are
/// fatal; records already appended remain durable.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append one record to the log.
    async fn append(&self, record: &DistanceRecord) -> Result<(), DriftError>;
}
