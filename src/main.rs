//! gosu-replays command-line interface
//!
//! Runs an incremental crawl of the replay listing, or prints statistics
//! from an existing index document.

use clap::Parser;
use gosu_replays::config::{load_config, Config};
use gosu_replays::crawler::{crawl_with_progress, CrawlOutcome, Progress};
use gosu_replays::index::ReplayIndex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// gosu-replays: incremental GosuGamers replay listing harvester
///
/// Walks the paginated replay listing, adds newly published replays to the
/// index document, and stops as soon as it reaches a replay it has already
/// indexed.
#[derive(Parser, Debug)]
#[command(name = "gosu-replays")]
#[command(version)]
#[command(about = "Incremental replay listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the index document and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gosu_replays=info,warn"),
            1 => EnvFilter::new("gosu_replays=debug,info"),
            2 => EnvFilter::new("gosu_replays=trace,debug"),
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

/// Handles the --stats mode: prints index statistics and exits
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let index = ReplayIndex::new(config.index.path.as_str())?;

    println!("Index: {}", config.index.path);
    println!("Replays indexed: {}", index.len());

    // listing order is newest-first, so the head of the index is the latest
    for replay in index.iter().take(5) {
        println!(
            "  {} | {} vs {} | {} | {}",
            replay.id().unwrap_or("?"),
            replay.get("sentinel").unwrap_or("?"),
            replay.get("scourge").unwrap_or("?"),
            replay.get("event").unwrap_or("?"),
            replay.get("date").unwrap_or("?"),
        );
    }

    Ok(())
}

/// Handles the default mode: runs the crawl with progress output
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Crawling {}", config.source.base_url);
    tracing::info!("Index document: {}", config.index.path);

    let outcome = crawl_with_progress(config, |done, total| {
        println!("Progress: {}/{} pages", done, total);
        Progress::Continue
    })
    .await?;

    match outcome {
        CrawlOutcome::Completed { pages_processed } => {
            println!("✓ Crawl complete: {} pages processed", pages_processed);
        }
        CrawlOutcome::CaughtUp { pages_processed } => {
            println!(
                "✓ Caught up with the index after {} pages, nothing more to do",
                pages_processed
            );
        }
        CrawlOutcome::Stopped { pages_processed } => {
            println!("Crawl stopped after {} pages", pages_processed);
        }
    }

    Ok(())
}
