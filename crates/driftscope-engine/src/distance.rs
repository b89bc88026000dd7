// crates/driftscope-engine/src/distance.rs
//
// Embedding distance engine.
//
// Owns the embedding backend handle for the lifetime of a run: the
// backend is constructed once and reused for every call. Unlike
// translation hops, embedding failures are fatal and propagate.

use std::sync::Arc;

use driftscope_core::{cosine_distance, DriftError, EmbeddingBackend};

/// Computes semantic distance between two sentences via their
/// embeddings.
pub struct DistanceEngine {
    backend: Arc<dyn EmbeddingBackend>,
}

impl DistanceEngine {
    pub fn new(backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self { backend }
    }

    /// Embed a fixed probe string once so a dead backend fails the run
    /// up front rather than partway through iteration 1.
    pub async fn probe(&self) -> Result<(), DriftError> {
        self.backend.embed("driftscope startup probe").await?;
        Ok(())
    }

    /// Cosine distance between the embeddings of `a` and `b`, in [0, 2].
    ///
    /// Symmetric; 0 when the sentences embed identically; exactly 1 when
    /// either embedding has zero norm.
    pub async fn distance(&self, a: &str, b: &str) -> Result<f64, DriftError> {
        let va = self.backend.embed(a).await?;
        let vb = self.backend.embed(b).await?;
        if va.len() != vb.len() {
            return Err(DriftError::Embedding(format!(
                "backend returned mismatched dimensions: {} vs {}",
                va.len(),
                vb.len()
            )));
        }
        Ok(cosine_distance(&va, &vb))
    }
}
