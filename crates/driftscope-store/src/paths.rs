// crates/driftscope-store/src/paths.rs
//
// Per-run artifact paths.
//
// Each run writes one CSV log and one chart image, both named with the
// run's start timestamp so artifacts from different runs never collide.

use std::path::{Path, PathBuf};

use driftscope_core::DriftError;

/// The pair of output artifacts for one run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub results_csv: PathBuf,
    pub chart_png: PathBuf,
}

impl RunPaths {
    /// Build timestamped artifact paths under `results_dir`, creating
    /// the directory if needed. Timestamp format: `YYYYmmdd_HHMMSS`.
    pub fn create(results_dir: impl AsRef<Path>) -> Result<Self, DriftError> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::with_stamp(results_dir, &stamp)
    }

    /// Build artifact paths with an explicit timestamp string.
    pub fn with_stamp(results_dir: impl AsRef<Path>, stamp: &str) -> Result<Self, DriftError> {
        let dir = results_dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            DriftError::Storage(format!("failed to create {}: {}", dir.display(), e))
        })?;

        Ok(Self {
            results_csv: dir.join(format!("results_{}.csv", stamp)),
            chart_png: dir.join(format!("distance_graph_{}.png", stamp)),
        })
    }
}
