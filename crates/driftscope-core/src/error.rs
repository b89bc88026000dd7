use thiserror::Error;

/// Workspace-wide error types for Driftscope.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Translation backend error (service failure, bad response).
    /// Caught inside a translation step and never propagated past it.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Embedding backend error. Fatal: embeddings are load-bearing
    /// and have no fallback.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Results log write/open failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A translation chain whose language pairs do not line up or do
    /// not round-trip back to the source language.
    #[error("Invalid chain: {0}")]
    InvalidChain(String),

    /// Invalid run state transition.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Chart rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DriftError {
    fn from(e: serde_json::Error) -> Self {
        DriftError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for DriftError {
    fn from(e: std::io::Error) -> Self {
        DriftError::Storage(e.to_string())
    }
}
