// crates/driftscope-engine/src/step.rs
//
// One directed translation hop with failure fallback and rate limiting.
//
// A step never fails its caller: any backend error degrades the hop to
// identity, with the cause preserved in the tagged outcome.

use std::sync::Arc;
use std::time::Duration;

use driftscope_core::{DriftError, TranslationBackend};

/// Outcome of a single translation hop.
///
/// Only the text propagates forward through the chain; the fallback
/// cause is kept for observability.
#[derive(Debug)]
pub enum StepOutcome {
    /// The backend translated the sentence.
    Translated(String),
    /// The backend failed; the hop passed its input through unchanged.
    Fallback { original: String, cause: DriftError },
}

impl StepOutcome {
    /// The text that feeds the next hop.
    pub fn text(&self) -> &str {
        match self {
            StepOutcome::Translated(text) => text,
            StepOutcome::Fallback { original, .. } => original,
        }
    }

    /// Consume the outcome, keeping only the forwarded text.
    pub fn into_text(self) -> String {
        match self {
            StepOutcome::Translated(text) => text,
            StepOutcome::Fallback { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StepOutcome::Fallback { .. })
    }
}

/// A single (source, target) translation hop bound to a backend.
pub struct TranslationStep {
    source: String,
    target: String,
    backend: Arc<dyn TranslationBackend>,
    delay: Duration,
}

impl TranslationStep {
    /// Create a step for a fixed language pair.
    ///
    /// `delay` is the minimum pause after every backend call, successful
    /// or not, to respect external service quotas.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        backend: Arc<dyn TranslationBackend>,
        delay: Duration,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            backend,
            delay,
        }
    }

    /// Source language code.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Target language code.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Translate one sentence through this hop.
    ///
    /// Backend errors are caught here and reported as a `Fallback`
    /// outcome carrying the unchanged input. The rate-limit delay is
    /// enforced after the call either way.
    pub async fn translate(&self, sentence: &str) -> StepOutcome {
        let outcome = match self.backend.translate(sentence, &self.source, &self.target).await {
            Ok(text) => {
                tracing::debug!(
                    "{} -> {}: {:?} -> {:?}",
                    self.source,
                    self.target,
                    truncate(sentence, 50),
                    truncate(&text, 50)
                );
                StepOutcome::Translated(text)
            }
            Err(cause) => {
                tracing::warn!(
                    "{} -> {} hop failed, passing input through: {}",
                    self.source,
                    self.target,
                    cause
                );
                StepOutcome::Fallback {
                    original: sentence.to_string(),
                    cause,
                }
            }
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        outcome
    }
}

/// First `max` characters of `text` on a char boundary, for log lines.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
