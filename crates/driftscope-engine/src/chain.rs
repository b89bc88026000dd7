// crates/driftscope-engine/src/chain.rs
//
// Ordered sequence of translation hops forming a round trip.
//
// Invariants, checked once at construction:
//   - the chain has at least one step
//   - step i's target language equals step i+1's source language
//   - the last step's target equals the first step's source

use std::sync::Arc;
use std::time::Duration;

use driftscope_core::{DriftError, TranslationBackend};

use crate::step::TranslationStep;

/// An ordered translation chain whose final output language equals the
/// original input language.
pub struct TranslationChain {
    steps: Vec<TranslationStep>,
}

impl std::fmt::Debug for TranslationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationChain")
            .field("len", &self.steps.len())
            .finish()
    }
}

impl TranslationChain {
    /// Build a chain from pre-constructed steps, validating the
    /// language-pair invariants.
    pub fn new(steps: Vec<TranslationStep>) -> Result<Self, DriftError> {
        if steps.is_empty() {
            return Err(DriftError::InvalidChain("chain has no steps".to_string()));
        }

        for pair in steps.windows(2) {
            if pair[0].target() != pair[1].source() {
                return Err(DriftError::InvalidChain(format!(
                    "step output language '{}' does not feed next step input language '{}'",
                    pair[0].target(),
                    pair[1].source()
                )));
            }
        }

        let first = steps.first().expect("non-empty checked above");
        let last = steps.last().expect("non-empty checked above");
        if first.source() != last.target() {
            return Err(DriftError::InvalidChain(format!(
                "chain does not round-trip: starts at '{}' but ends at '{}'",
                first.source(),
                last.target()
            )));
        }

        Ok(Self { steps })
    }

    /// Build a chain from a language route such as
    /// `["en", "fr", "iw", "en"]`, one step per consecutive pair, all
    /// bound to the same backend and rate-limit delay.
    pub fn from_route(
        route: &[&str],
        backend: Arc<dyn TranslationBackend>,
        delay: Duration,
    ) -> Result<Self, DriftError> {
        if route.len() < 2 {
            return Err(DriftError::InvalidChain(format!(
                "route needs at least two languages, got {:?}",
                route
            )));
        }

        let steps = route
            .windows(2)
            .map(|pair| TranslationStep::new(pair[0], pair[1], backend.clone(), delay))
            .collect();

        Self::new(steps)
    }

    /// Number of hops in the chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The chain's input (and, by the round-trip invariant, output)
    /// language code.
    pub fn source_language(&self) -> &str {
        self.steps[0].source()
    }

    /// Run a sentence through every hop strictly in order.
    ///
    /// A failed hop has already degraded to identity inside the step,
    /// so the chain itself is infallible.
    pub async fn run(&self, sentence: &str) -> String {
        let mut current = sentence.to_string();
        for step in &self.steps {
            current = step.translate(&current).await.into_text();
        }
        current
    }
}
