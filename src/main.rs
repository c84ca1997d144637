//! Binary entry point for marquee.
//!
//! This binary serves the movie catalog HTTP API.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for startup failures before logging exists
#![allow(clippy::print_stderr)]

use clap::Parser;
use marquee::config::MarqueeConfig;
use marquee::http::{self, AppState};
use marquee::observability::{self, InitOptions};
use marquee::store::{CatalogBackend, InMemoryCatalog, load_fixture};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Marquee - a small HTTP service for a movie catalog.
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on. Overrides the config file and `PORT`.
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to configuration file.
    #[arg(short, long, env = "MARQUEE_CONFIG_PATH")]
    config: Option<String>,

    /// Path to the seed fixture (JSON array of movie records).
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(InitOptions {
        verbose: cli.verbose,
        json: config.log_json,
    }) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration, applying environment and CLI overrides in that
/// order.
fn load_config(cli: &Cli) -> marquee::Result<MarqueeConfig> {
    let config = match cli.config.as_deref() {
        Some(path) if !path.trim().is_empty() => MarqueeConfig::load_from_file(Path::new(path))?,
        _ => MarqueeConfig::load_default(),
    };

    let mut config = config.with_env_overrides()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(seed) = cli.seed.clone() {
        config.seed_path = seed;
    }

    Ok(config)
}

/// Seeds the catalog and serves the API.
async fn run(config: MarqueeConfig) -> marquee::Result<()> {
    let movies = load_fixture(&config.seed_path)?;
    tracing::info!(
        count = movies.len(),
        fixture = %config.seed_path.display(),
        "seeded movie catalog"
    );

    let catalog: Arc<dyn CatalogBackend> = Arc::new(InMemoryCatalog::with_movies(movies));
    let state = AppState::new(catalog, config.allowed_origins.clone());

    http::serve(&config, state).await
}
