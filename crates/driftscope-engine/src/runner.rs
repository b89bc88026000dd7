// crates/driftscope-engine/src/runner.rs
//
// The drift-measurement loop.
//
// Per iteration: generate a sentence, run it through the translation
// chain, compute the embedding distance to the original, persist the
// record, then decide stop/continue. All resilience lives in the
// translation steps; embedding and storage errors abort the run.

use std::sync::Arc;

use driftscope_core::{DistanceRecord, DriftError, RecordSink, SentenceGenerator};

use crate::chain::TranslationChain;
use crate::distance::DistanceEngine;
use crate::state::{RunState, RunStateMachine};

/// Stop/continue policy for the loop.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// The loop stops when a recorded distance strictly exceeds this.
    pub stopping_threshold: f64,
    /// Hard cap on loop length.
    pub max_iterations: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            stopping_threshold: 0.4,
            max_iterations: 100,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// The terminal state the loop stopped in.
    pub state: RunState,
    /// Number of iterations executed (== number of records).
    pub iterations: u32,
    /// Every iteration's record, in order.
    pub records: Vec<DistanceRecord>,
}

impl RunReport {
    /// The distance series, in iteration order.
    pub fn distances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.distance).collect()
    }
}

/// Orchestrator that drives generator, chain, distance engine, and
/// record sink one iteration at a time.
pub struct DriftLoop {
    generator: SentenceGenerator,
    chain: TranslationChain,
    distance: DistanceEngine,
    sink: Arc<dyn RecordSink>,
    config: LoopConfig,
}

impl DriftLoop {
    pub fn new(
        generator: SentenceGenerator,
        chain: TranslationChain,
        distance: DistanceEngine,
        sink: Arc<dyn RecordSink>,
        config: LoopConfig,
    ) -> Self {
        Self {
            generator,
            chain,
            distance,
            sink,
            config,
        }
    }

    /// Run to termination.
    ///
    /// Returns the report with the terminal state and every record, or
    /// the first fatal error (embedding backend or record sink). Records
    /// persisted before a fatal error remain durable in the sink.
    pub async fn run(&mut self) -> Result<RunReport, DriftError> {
        // Fail fast if the embedding backend is unusable.
        self.distance.probe().await?;

        let mut machine = RunStateMachine::new();
        let mut records: Vec<DistanceRecord> = Vec::new();
        let mut iteration: u32 = 0;

        if self.config.max_iterations == 0 {
            machine.transition(RunState::StoppedMaxIter)?;
            return Ok(RunReport {
                state: machine.current,
                iterations: 0,
                records,
            });
        }

        while machine.current == RunState::Running {
            let input = self.generator.generate();
            let output = self.chain.run(&input).await;
            let distance = self.distance.distance(&input, &output).await?;

            tracing::info!(
                "iteration {}: distance {:.4} ({:?} -> {:?})",
                iteration,
                distance,
                input,
                output
            );

            let record = DistanceRecord::new(iteration, input, output, distance);
            self.sink.append(&record).await?;
            records.push(record);
            iteration += 1;

            // Strict '>' : a distance exactly equal to the threshold
            // does not stop the loop.
            if distance > self.config.stopping_threshold {
                machine.transition(RunState::StoppedThreshold)?;
            } else if iteration == self.config.max_iterations {
                machine.transition(RunState::StoppedMaxIter)?;
            }
        }

        tracing::info!(
            "run stopped in state {} after {} iterations",
            machine.current,
            iteration
        );

        Ok(RunReport {
            state: machine.current,
            iterations: iteration,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use driftscope_core::{EmbeddingBackend, HashEmbedding, TranslationBackend};

    struct Identity;

    #[async_trait]
    impl TranslationBackend for Identity {
        async fn translate(&self, text: &str, _source: &str, _target: &str)
            -> Result<String, DriftError>
        {
            Ok(text.to_string())
        }
    }

    /// Rewrites every sentence to a fixed marker string.
    struct RewriteTo(&'static str);

    #[async_trait]
    impl TranslationBackend for RewriteTo {
        async fn translate(&self, _text: &str, _source: &str, _target: &str)
            -> Result<String, DriftError>
        {
            Ok(self.0.to_string())
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl TranslationBackend for AlwaysFails {
        async fn translate(&self, _text: &str, _source: &str, _target: &str)
            -> Result<String, DriftError>
        {
            Err(DriftError::Translation("down".to_string()))
        }
    }

    /// Embedding stub: the marker sentence embeds orthogonally to
    /// everything else, so its distance to any generated input is 1.
    struct OrthogonalMarker(&'static str);

    #[async_trait]
    impl EmbeddingBackend for OrthogonalMarker {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, DriftError> {
            if text == self.0 {
                Ok(vec![0.0, 1.0])
            } else {
                Ok(vec![1.0, 0.0])
            }
        }
    }

    /// In-memory sink capturing appended records.
    #[derive(Default)]
    struct MemorySink {
        records: Mutex<Vec<DistanceRecord>>,
    }

    #[async_trait]
    impl RecordSink for MemorySink {
        async fn append(&self, record: &DistanceRecord) -> Result<(), DriftError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl RecordSink for BrokenSink {
        async fn append(&self, _record: &DistanceRecord) -> Result<(), DriftError> {
            Err(DriftError::Storage("disk full".to_string()))
        }
    }

    fn identity_chain() -> TranslationChain {
        TranslationChain::from_route(
            &["en", "fr", "iw", "en"],
            Arc::new(Identity),
            Duration::ZERO,
        )
        .unwrap()
    }

    fn marker_chain(marker: &'static str) -> TranslationChain {
        TranslationChain::from_route(&["en", "fr", "en"], Arc::new(RewriteTo(marker)), Duration::ZERO)
            .unwrap()
    }

    #[tokio::test]
    async fn identity_chain_runs_to_max_iterations() {
        let sink = Arc::new(MemorySink::default());
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(1),
            identity_chain(),
            DistanceEngine::new(Arc::new(HashEmbedding::new(64))),
            sink.clone(),
            LoopConfig {
                stopping_threshold: 0.4,
                max_iterations: 5,
            },
        );

        let report = drift_loop.run().await.unwrap();
        assert_eq!(report.state, RunState::StoppedMaxIter);
        assert_eq!(report.iterations, 5);
        assert_eq!(report.records.len(), 5);
        assert!(report.distances().iter().all(|d| d.abs() < 1e-10));
        assert_eq!(sink.records.lock().unwrap().len(), 5);

        // All distances are zero, so mean and variance are too.
        let stats = driftscope_core::DriftStatistics::from_series(&report.distances());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[tokio::test]
    async fn orthogonal_rewrite_stops_on_first_iteration() {
        let marker = "completely unrelated output";
        let sink = Arc::new(MemorySink::default());
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(2),
            marker_chain(marker),
            DistanceEngine::new(Arc::new(OrthogonalMarker(marker))),
            sink.clone(),
            LoopConfig {
                stopping_threshold: 0.4,
                max_iterations: 100,
            },
        );

        let report = drift_loop.run().await.unwrap();
        assert_eq!(report.state, RunState::StoppedThreshold);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.records.len(), 1);
        assert!((report.records[0].distance - 1.0).abs() < 1e-10);

        // The log's final record is the triggering record.
        let logged = sink.records.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged.last().unwrap().output_sentence, marker);
    }

    #[tokio::test]
    async fn failing_backend_yields_zero_distance_run() {
        let sink = Arc::new(MemorySink::default());
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(3),
            TranslationChain::from_route(
                &["en", "fr", "iw", "en"],
                Arc::new(AlwaysFails),
                Duration::ZERO,
            )
            .unwrap(),
            DistanceEngine::new(Arc::new(HashEmbedding::new(64))),
            sink,
            LoopConfig {
                stopping_threshold: 0.4,
                max_iterations: 3,
            },
        );

        let report = drift_loop.run().await.unwrap();
        assert_eq!(report.state, RunState::StoppedMaxIter);
        for record in &report.records {
            // Every hop degraded to identity, so output == input.
            assert_eq!(record.input_sentence, record.output_sentence);
            assert!(record.distance.abs() < 1e-10);
        }
    }

    #[tokio::test]
    async fn distance_equal_to_threshold_does_not_stop() {
        // Orthogonal marker gives distance exactly 1.0 every iteration;
        // with threshold 1.0 the strict comparison never trips.
        let marker = "orthogonal output";
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(4),
            marker_chain(marker),
            DistanceEngine::new(Arc::new(OrthogonalMarker(marker))),
            Arc::new(MemorySink::default()),
            LoopConfig {
                stopping_threshold: 1.0,
                max_iterations: 4,
            },
        );

        let report = drift_loop.run().await.unwrap();
        assert_eq!(report.state, RunState::StoppedMaxIter);
        assert_eq!(report.iterations, 4);
        assert!(report.distances().iter().all(|d| (d - 1.0).abs() < 1e-10));
    }

    #[tokio::test]
    async fn sink_failure_aborts_the_run() {
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(5),
            identity_chain(),
            DistanceEngine::new(Arc::new(HashEmbedding::new(64))),
            Arc::new(BrokenSink),
            LoopConfig::default(),
        );

        let err = drift_loop.run().await.unwrap_err();
        assert!(matches!(err, DriftError::Storage(_)));
    }

    #[tokio::test]
    async fn zero_max_iterations_stops_immediately() {
        let sink = Arc::new(MemorySink::default());
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(6),
            identity_chain(),
            DistanceEngine::new(Arc::new(HashEmbedding::new(64))),
            sink.clone(),
            LoopConfig {
                stopping_threshold: 0.4,
                max_iterations: 0,
            },
        );

        let report = drift_loop.run().await.unwrap();
        assert_eq!(report.state, RunState::StoppedMaxIter);
        assert_eq!(report.iterations, 0);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_iteration_indexes_are_sequential_from_zero() {
        let mut drift_loop = DriftLoop::new(
            SentenceGenerator::from_seed(7),
            identity_chain(),
            DistanceEngine::new(Arc::new(HashEmbedding::new(64))),
            Arc::new(MemorySink::default()),
            LoopConfig {
                stopping_threshold: 0.4,
                max_iterations: 4,
            },
        );

        let report = drift_loop.run().await.unwrap();
        let indexes: Vec<u32> = report.records.iter().map(|r| r.iteration).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }
}
