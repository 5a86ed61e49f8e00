//! Configuration module
//!
//! Loads and validates the TOML configuration file. Every key has a default,
//! so running without a config file crawls the GosuGamers replay listing and
//! keeps the index next to the working directory.
//!
//! # Example
//!
//! ```no_run
//! use gosu_replays::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling from: {}", config.source.base_url);
//! ```

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Default root of the replay listing.
pub const DEFAULT_BASE_URL: &str = "http://www.gosugamers.net/dota/replays";

/// Default location of the persisted index document.
pub const DEFAULT_INDEX_PATH: &str = "replays.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

/// Listing source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Root URL of the replay listing
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Index document configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Path to the persisted record-collection document
    #[serde(default = "default_index_path")]
    pub path: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("gosu-replays/{}", env!("CARGO_PKG_VERSION"))
}

fn default_index_path() -> String {
    DEFAULT_INDEX_PATH.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a configuration
///
/// The base URL must be an absolute http(s) URL and the index path must be
/// non-empty.
pub fn validate(config: &Config) -> ConfigResult<()> {
    let url = Url::parse(&config.source.base_url).map_err(|e| {
        ConfigError::Validation(format!(
            "base-url {:?} is not a valid URL: {}",
            config.source.base_url, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got {:?}",
            url.scheme()
        )));
    }

    if config.index.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "index path must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[source]
base-url = "http://replays.example.com/listing"
user-agent = "TestHarvester/0.1"

[index]
path = "./test-index.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.base_url, "http://replays.example.com/listing");
        assert_eq!(config.source.user_agent, "TestHarvester/0.1");
        assert_eq!(config.index.path, "./test-index.json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.index.path, DEFAULT_INDEX_PATH);
        assert!(config.source.user_agent.starts_with("gosu-replays/"));
    }

    #[test]
    fn test_default_config_is_valid() {
        validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let file = create_temp_config("[source]\nbase-url = \"not a url\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let file = create_temp_config("[source]\nbase-url = \"ftp://example.com/replays\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_index_path_rejected() {
        let file = create_temp_config("[index]\npath = \"\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = create_temp_config("[source]\nbase-uri = \"http://example.com\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
