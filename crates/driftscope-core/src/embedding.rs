// crates/driftscope-core/src/embedding.rs
//
// Embedding distance math and the offline deterministic embedding backend.
//
// Semantic distance is cosine distance: 1 - cosine_similarity. A sentence
// pair that embeds identically has distance 0; orthogonal embeddings have
// distance 1; opposed embeddings have distance 2.

use async_trait::async_trait;

use crate::error::DriftError;
use crate::traits::EmbeddingBackend;

/// Compute cosine similarity between two f32 vectors.
///
/// Accumulates in f64. Returns 0.0 when either vector has zero norm or
/// the vectors are empty; callers that need the zero-norm policy should
/// use `cosine_distance` instead.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    if a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Cosine distance between two embedding vectors, in [0, 2].
///
/// Zero-norm policy: if either vector has zero norm the distance is
/// defined as exactly 1.0 (maximal ambiguity) rather than left to
/// floating-point accident.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let zero_norm = |v: &[f32]| v.iter().all(|x| *x == 0.0);
    if a.is_empty() || b.is_empty() || zero_norm(a) || zero_norm(b) {
        return 1.0;
    }
    // Clamp: f64 rounding can push |cos| a hair past 1.
    let sim = cosine_similarity(a, b).clamp(-1.0, 1.0);
    1.0 - sim
}

/// Deterministic pseudo-embedding: hash text + dimension index to produce a
/// reproducible float vector, then L2-normalize. Identical text always yields
/// an identical vector (cosine similarity ~1.0). No ML model required.
pub fn hash_embedding(text: &str, dimensions: usize) -> Vec<f32> {
    use sha2::{Digest, Sha256};

    let mut raw = Vec::with_capacity(dimensions);
    for i in 0..dimensions {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(i.to_le_bytes());
        let hash = hasher.finalize();
        // Interpret first 4 bytes as u32, map to [-1, 1]
        let bits = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]);
        let val = (bits as f64 / u32::MAX as f64) * 2.0 - 1.0;
        raw.push(val as f32);
    }

    // L2-normalize
    let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in raw.iter_mut() {
            *v /= norm;
        }
    }

    raw
}

/// Offline embedding backend built on `hash_embedding`.
///
/// Useful for runs without an embedding server and for deterministic
/// tests: the vector depends only on the exact text.
#[derive(Debug, Clone)]
pub struct HashEmbedding {
    dimensions: usize,
}

impl HashEmbedding {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEmbedding {
    /// 384 dimensions, matching the common small sentence-embedding models.
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingBackend for HashEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DriftError> {
        Ok(hash_embedding(text, self.dimensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_of_identical_vectors_is_zero() {
        let v = hash_embedding("the quick brown fox", 64);
        assert!(cosine_distance(&v, &v).abs() < 1e-10);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = hash_embedding("hello world", 64);
        let b = hash_embedding("goodbye world", 64);
        let d_ab = cosine_distance(&a, &b);
        let d_ba = cosine_distance(&b, &a);
        assert!((d_ab - d_ba).abs() < 1e-12);
    }

    #[test]
    fn distance_is_bounded() {
        for (x, y) in [
            ("a sentence", "a sentence"),
            ("a sentence", "something else entirely"),
            ("", "non-empty"),
        ] {
            let a = hash_embedding(x, 32);
            let b = hash_embedding(y, 32);
            let d = cosine_distance(&a, &b);
            assert!((0.0..=2.0).contains(&d), "distance {} out of range", d);
        }
    }

    #[test]
    fn orthogonal_vectors_have_distance_one() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert!((cosine_distance(&a, &b) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn opposed_vectors_have_distance_two() {
        let a = vec![1.0f32, 0.0];
        let b = vec![-1.0f32, 0.0];
        assert!((cosine_distance(&a, &b) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn zero_norm_vector_has_distance_one() {
        let zero = vec![0.0f32; 8];
        let v = hash_embedding("anything", 8);
        assert_eq!(cosine_distance(&zero, &v), 1.0);
        assert_eq!(cosine_distance(&v, &zero), 1.0);
        assert_eq!(cosine_distance(&zero, &zero), 1.0);
    }

    #[test]
    fn hash_embedding_is_deterministic_and_normalized() {
        let a = hash_embedding("reproducible", 128);
        let b = hash_embedding("reproducible", 128);
        assert_eq!(a, b);

        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn distinct_text_embeds_differently() {
        let a = hash_embedding("one sentence", 64);
        let b = hash_embedding("another sentence", 64);
        assert!(cosine_distance(&a, &b) > 1e-6);
    }

    #[tokio::test]
    async fn backend_distance_depends_only_on_text() {
        // Identical text through the backend yields identical vectors,
        // regardless of how the strings were produced.
        let backend = HashEmbedding::new(64);
        let owned = String::from("same") + " text";
        let a = backend.embed("same text").await.unwrap();
        let b = backend.embed(&owned).await.unwrap();
        assert_eq!(a, b);
    }
}
