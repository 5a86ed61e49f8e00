//! gosu-replays: an incremental harvester for the GosuGamers DotA replay listing
//!
//! This crate crawls the paginated replay listing, extracts one record per
//! listing row, deduplicates against a previously persisted index document,
//! and appends newly discovered replays. A run stops as soon as it encounters
//! a replay that is already indexed ("caught up").

pub mod config;
pub mod crawler;
pub mod index;
pub mod parser;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Listing parse error: {0}")]
    Parse(#[from] parser::ParseError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Crawler, Progress};
pub use index::{AddOutcome, Record, ReplayIndex};
