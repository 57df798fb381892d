// src/main.rs

//! hyscrape: Hytale server listing scraper CLI
//!
//! Scrapes configured server listing sites and updates the JSON catalog
//! consumed by the listing website. Exits 0 when the catalog was saved,
//! 1 when the save failed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hyscrape::models::Config;
use hyscrape::pipeline::run_scraper;
use hyscrape::storage::LocalStorage;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(name = "hyscrape", version, about = "Hytale server listing scraper")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Override the catalog output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(output) = cli.output {
        config.output.file = output.to_string_lossy().into_owned();
    }

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let storage = LocalStorage::new(&config.output.file);

    match run_scraper(&config, &storage).await {
        Ok(stats) => {
            log::info!(
                "Scrape complete: {} sites ({} failed), {} records scraped, {} in catalog, took {}s",
                stats.sites_total,
                stats.sites_failed,
                stats.records_scraped,
                stats.catalog_size,
                (stats.end_time - stats.start_time).num_seconds()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Scrape failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
