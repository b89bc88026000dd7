// crates/driftscope-core/src/record.rs
//
// Per-iteration drift records and the summary statistics derived from
// the full distance series after a run terminates.

use serde::{Deserialize, Serialize};

/// One iteration's outcome. Immutable once created; appended to the
/// results log, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceRecord {
    /// Zero-based iteration index.
    pub iteration: u32,
    /// The generated input sentence.
    pub input_sentence: String,
    /// The sentence after the full translation round trip.
    pub output_sentence: String,
    /// Cosine distance between the two embeddings, in [0, 2].
    pub distance: f64,
}

impl DistanceRecord {
    pub fn new(iteration: u32, input: impl Into<String>, output: impl Into<String>, distance: f64) -> Self {
        Self {
            iteration,
            input_sentence: input.into(),
            output_sentence: output.into(),
            distance,
        }
    }
}

/// Summary statistics over a recorded distance series.
///
/// Derived, not stored: computed once over the full series at loop
/// termination. Variance is population variance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriftStatistics {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DriftStatistics {
    /// Compute statistics over a distance series.
    ///
    /// An empty series yields all-zero statistics rather than NaN, so
    /// downstream rendering never has to special-case it.
    pub fn from_series(distances: &[f64]) -> Self {
        if distances.is_empty() {
            return Self {
                mean: 0.0,
                variance: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let n = distances.len() as f64;
        let mean = distances.iter().sum::<f64>() / n;
        let variance = distances.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
        let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = distances.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_all_zero() {
        let stats = DriftStatistics::from_series(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
    }

    #[test]
    fn constant_series_has_zero_variance() {
        let stats = DriftStatistics::from_series(&[0.25, 0.25, 0.25, 0.25]);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 0.25);
        assert_eq!(stats.max, 0.25);
    }

    #[test]
    fn known_series_statistics() {
        // mean 0.3, population variance 0.08 / 3
        let stats = DriftStatistics::from_series(&[0.1, 0.3, 0.5]);
        assert!((stats.mean - 0.3).abs() < 1e-12);
        assert!((stats.variance - 0.08 / 3.0).abs() < 1e-12);
        assert!((stats.std_dev - stats.variance.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.5);
    }

    #[test]
    fn extrema_cover_threshold_triggering_record() {
        // The record that trips a threshold stop is still part of the
        // series the statistics are computed over.
        let stats = DriftStatistics::from_series(&[0.1, 0.2, 0.9]);
        assert_eq!(stats.max, 0.9);
    }
}
