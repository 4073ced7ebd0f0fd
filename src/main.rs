//! Wikiharvest main entry point
//!
//! Command-line interface for the encyclopedia revision crawler and the
//! shard reconciliation tool.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikiharvest::config::load_config;
use wikiharvest::crawler::crawl;
use wikiharvest::reconcile::{load_titles, reconcile};

/// Wikiharvest: an encyclopedia revision crawler
///
/// Crawls a MediaWiki revision API from a generated range of seed titles,
/// follows internal links one level deep, and persists one JSON document per
/// title into a keyed store.
#[derive(Parser, Debug)]
#[command(name = "wikiharvest")]
#[command(version = "1.0.0")]
#[command(about = "An encyclopedia revision crawler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the revision API over the configured seed range
    Crawl {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Look titles up across store shards and collect the found values
    Reconcile {
        /// Path to a JSON array of titles to resolve
        #[arg(value_name = "TITLES")]
        titles: PathBuf,

        /// File the found raw values are appended to
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Directory containing the shard store files
        #[arg(long, default_value = ".")]
        shard_dir: PathBuf,

        /// First shard index (inclusive)
        #[arg(long, default_value_t = 110)]
        start: u64,

        /// Last shard index (exclusive)
        #[arg(long, default_value_t = 116)]
        stop: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl { config } => handle_crawl(&config).await,
        Command::Reconcile {
            titles,
            output,
            shard_dir,
            start,
            stop,
        } => handle_reconcile(&titles, &output, &shard_dir, start, stop),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikiharvest=info,warn"),
            1 => EnvFilter::new("wikiharvest=debug,info"),
            2 => EnvFilter::new("wikiharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl subcommand
async fn handle_crawl(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading configuration from: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Seed range: [{}, {}), template: {}",
        config.application.start,
        config.application.stop,
        config.application.template
    );

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Information collected");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the reconcile subcommand
fn handle_reconcile(
    titles_path: &Path,
    output_path: &Path,
    shard_dir: &Path,
    start: u64,
    stop: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading titles from: {}", titles_path.display());
    let titles = load_titles(titles_path)?;
    tracing::info!(
        "Resolving {} titles across shards [{}, {})",
        titles.len(),
        start,
        stop
    );

    match reconcile(&titles, shard_dir, start, stop, output_path) {
        Ok(unresolved) => {
            // The unresolved ledger goes to stdout as JSON
            println!("{}", serde_json::to_string(&unresolved)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Reconciliation failed: {}", e);
            Err(e.into())
        }
    }
}
