// crates/driftscope-backends/src/lib.rs
//
// driftscope-backends: HTTP clients for the external translation and
// embedding services.
//
// Both clients are thin JSON wrappers; all policy (fallback for
// translations, fatality for embeddings) lives with the callers.

pub mod embed;
pub mod translate;

pub use embed::HttpEmbedding;
pub use translate::HttpTranslator;
