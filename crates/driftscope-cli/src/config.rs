// crates/driftscope-cli/src/config.rs
//
// Runtime configuration for a drift-measurement run.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for the `driftscope` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// The loop stops when a recorded distance strictly exceeds this.
    #[serde(default = "default_stopping_threshold")]
    pub stopping_threshold: f64,

    /// Hard cap on loop length.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Minimum pause after every translation call, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Translation route as language codes; first and last must match
    /// so the chain round-trips.
    #[serde(default = "default_route")]
    pub route: Vec<String>,

    /// Directory for per-run CSV and chart artifacts.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Full URL of the translation endpoint.
    #[serde(default = "default_translate_url")]
    pub translate_url: String,

    /// Embedding backend: "hash" for the offline deterministic backend,
    /// or the full URL of an embedding endpoint.
    #[serde(default = "default_embedding")]
    pub embedding: String,

    /// Vector dimensions for the offline hash embedding backend.
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stopping_threshold() -> f64 {
    0.4
}

fn default_max_iterations() -> u32 {
    100
}

fn default_step_delay_ms() -> u64 {
    500
}

fn default_route() -> Vec<String> {
    vec![
        "en".to_string(),
        "fr".to_string(),
        "iw".to_string(),
        "en".to_string(),
    ]
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_translate_url() -> String {
    "http://localhost:5000/translate".to_string()
}

fn default_embedding() -> String {
    "hash".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stopping_threshold: default_stopping_threshold(),
            max_iterations: default_max_iterations(),
            step_delay_ms: default_step_delay_ms(),
            route: default_route(),
            results_dir: default_results_dir(),
            translate_url: default_translate_url(),
            embedding: default_embedding(),
            embedding_dimensions: default_embedding_dimensions(),
            log_level: default_log_level(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
