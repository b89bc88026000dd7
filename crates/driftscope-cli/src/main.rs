// crates/driftscope-cli/src/main.rs
//
// Binary entrypoint for Driftscope.
//
// Initializes tracing, parses CLI arguments, loads configuration,
// constructs the translation chain and embedding backend, runs the
// drift loop, and writes the per-run CSV log and distance chart.

mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use config::RunConfig;
use driftscope_backends::{HttpEmbedding, HttpTranslator};
use driftscope_core::{
    DriftStatistics, EmbeddingBackend, HashEmbedding, SentenceGenerator, TranslationBackend,
};
use driftscope_engine::{DistanceEngine, DriftLoop, LoopConfig, TranslationChain};
use driftscope_report::render_drift_chart;
use driftscope_store::{CsvResultsStore, RunPaths};

/// Driftscope: measure semantic drift across machine-translation round trips.
#[derive(Parser, Debug)]
#[command(
    name = "driftscope",
    version = "0.1.0",
    about = "Measures semantic drift of sentences round-tripped through a translation chain"
)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.driftscope/config.toml")]
    config: String,

    /// Override the stopping threshold from the config file.
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the iteration cap from the config file.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Seed the sentence generator for a reproducible input sequence.
    #[arg(long)]
    seed: Option<u64>,

    /// Use the offline hash embedding backend regardless of config.
    #[arg(long)]
    offline: bool,

    /// Override the results directory from the config file.
    #[arg(long)]
    results_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults if the
    // file is not found.
    let config_path = expand_tilde(&args.config);
    let mut config = match RunConfig::load(&config_path) {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", config_path);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                config_path,
                e
            );
            RunConfig::default()
        }
    };

    // CLI flags override config file values.
    if let Some(threshold) = args.threshold {
        config.stopping_threshold = threshold;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(results_dir) = args.results_dir {
        config.results_dir = results_dir;
    }
    if args.offline {
        config.embedding = "hash".to_string();
    }

    tracing::info!("Driftscope v0.1.0");
    tracing::info!("Route: {}", config.route.join(" -> "));
    tracing::info!(
        "Stopping threshold: {} | max iterations: {}",
        config.stopping_threshold,
        config.max_iterations
    );

    let results_dir = expand_tilde(&config.results_dir);
    let paths = RunPaths::create(&results_dir)?;
    tracing::info!("Results will be saved to {}", paths.results_csv.display());
    tracing::info!("Chart will be saved to {}", paths.chart_png.display());

    // Translation backend: every hop shares one HTTP client.
    let translator: Arc<dyn TranslationBackend> =
        Arc::new(HttpTranslator::new(config.translate_url.clone()));

    // Embedding backend: offline deterministic hashing or an HTTP model
    // server. Constructed once, reused for every distance call.
    let embedder: Arc<dyn EmbeddingBackend> = if config.embedding == "hash" {
        tracing::info!(
            "Embedding backend: offline hash ({} dimensions)",
            config.embedding_dimensions
        );
        Arc::new(HashEmbedding::new(config.embedding_dimensions))
    } else {
        tracing::info!("Embedding backend: {}", config.embedding);
        Arc::new(HttpEmbedding::new(config.embedding.clone()))
    };

    let route: Vec<&str> = config.route.iter().map(String::as_str).collect();
    let chain = TranslationChain::from_route(
        &route,
        translator,
        Duration::from_millis(config.step_delay_ms),
    )?;

    let generator = match args.seed {
        Some(seed) => {
            tracing::info!("Sentence generator seeded with {}", seed);
            SentenceGenerator::from_seed(seed)
        }
        None => SentenceGenerator::new(),
    };

    let store = Arc::new(CsvResultsStore::new(&paths.results_csv));

    let mut drift_loop = DriftLoop::new(
        generator,
        chain,
        DistanceEngine::new(embedder),
        store,
        LoopConfig {
            stopping_threshold: config.stopping_threshold,
            max_iterations: config.max_iterations,
        },
    );

    let report = drift_loop.run().await?;

    let distances = report.distances();
    let stats = DriftStatistics::from_series(&distances);

    tracing::info!("Run stopped in state {} after {} iterations", report.state, report.iterations);
    tracing::info!("Mean distance:  {:.4}", stats.mean);
    tracing::info!("Variance:       {:.4}", stats.variance);
    tracing::info!("Std deviation:  {:.4}", stats.std_dev);
    tracing::info!("Min distance:   {:.4}", stats.min);
    tracing::info!("Max distance:   {:.4}", stats.max);

    render_drift_chart(&paths.chart_png, &distances, &stats, config.stopping_threshold)?;
    tracing::info!("Chart saved to {}", paths.chart_png.display());
    tracing::info!("Results saved to {}", paths.results_csv.display());

    Ok(())
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}
