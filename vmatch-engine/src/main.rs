//! vmatch - batch sample-to-volcano matcher
//!
//! Loads a volcano catalog and a JSON Lines sample file, matches every
//! sample on a rayon worker pool and writes one JSON record per sample.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vmatch_common::config::{load_config, resolve_config_path};
use vmatch_engine::{loader, MatchingEngine, VolcanoIndex};

/// Command-line arguments for vmatch
#[derive(Parser, Debug)]
#[command(name = "vmatch")]
#[command(about = "Match geochemical samples to their source volcanoes")]
#[command(version)]
struct Args {
    /// Volcano catalog (JSON array)
    #[arg(long, env = "VMATCH_VOLCANOES")]
    volcanoes: PathBuf,

    /// Samples to match (JSON Lines)
    #[arg(long, env = "VMATCH_SAMPLES")]
    samples: PathBuf,

    /// Output file for match records (JSON Lines)
    #[arg(short, long, env = "VMATCH_OUTPUT")]
    output: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to config, then one per CPU)
    #[arg(short, long, env = "VMATCH_THREADS")]
    threads: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config first so its log level can seed the filter
    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing
    let level = &config.logging.level;
    let default_filter = format!("vmatch_engine={level},vmatch_common={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vmatch {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Config: {}", path.display());
    }

    let volcanoes = loader::load_volcanoes(&args.volcanoes)
        .await
        .with_context(|| format!("Failed to load volcanoes from {}", args.volcanoes.display()))?;
    let samples = loader::load_samples(&args.samples)
        .await
        .with_context(|| format!("Failed to load samples from {}", args.samples.display()))?;

    let index = Arc::new(VolcanoIndex::build(volcanoes).context("Failed to build volcano index")?);
    let engine = Arc::new(
        MatchingEngine::new(index, config.matching.clone())
            .context("Failed to initialize matching engine")?,
    );

    let threads = args
        .threads
        .or(config.batch.threads)
        .unwrap_or_else(num_threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build worker pool")?;
    info!(threads, samples = samples.len(), "Matching batch");

    // One timestamp for the whole run
    let ts = Utc::now();
    let report = tokio::task::spawn_blocking({
        let engine = Arc::clone(&engine);
        move || pool.install(|| engine.run_batch(&samples, ts))
    })
    .await
    .context("Matching task failed")?;

    loader::write_results(&args.output, &report.results)
        .await
        .with_context(|| format!("Failed to write results to {}", args.output.display()))?;

    info!("{}", report.statistics.display_string());
    Ok(())
}

fn num_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
