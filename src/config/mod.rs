//! Configuration management.
//!
//! Settings are read from a TOML file and may be overridden by environment
//! variables prefixed with `LIBRARYCLOUD_SEARCH_`, using `__` between
//! section and key:
//!
//! ```toml
//! [search]
//! endpoint = "http://api.lib.harvard.edu/v2/items.dc.json"
//! query_param = "q"
//! timeout_secs = 30
//!
//! [output]
//! container = "results.html"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! ```bash
//! export LIBRARYCLOUD_SEARCH_SEARCH__ENDPOINT="http://localhost:8080/v2/items.dc.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::{DEFAULT_ENDPOINT, DEFAULT_QUERY_PARAM};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "LIBRARYCLOUD_SEARCH";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "librarycloud-search.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search endpoint settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Where rendered results go
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Item API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Query string parameter carrying the search term
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Custom user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            query_param: default_query_param(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File whose content is replaced with each render; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Write the configuration as pretty TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_overrides())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Configuration from environment overrides and defaults only
pub fn get_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(env_overrides())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Default location of the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
}

/// Locate a configuration file: the working directory first, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.query_param, "q");
        assert!(config.search.timeout_secs.is_none());
        assert!(config.output.container.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(
            &path,
            r#"
[search]
endpoint = "http://localhost:9000/v2/items.dc.json"
timeout_secs = 15

[output]
container = "/tmp/results.html"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.search.endpoint, "http://localhost:9000/v2/items.dc.json");
        assert_eq!(config.search.query_param, "q");
        assert_eq!(config.search.timeout_secs, Some(15));
        assert_eq!(
            config.output.container,
            Some(PathBuf::from("/tmp/results.html"))
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.timeout_secs = Some(42);
        config.save(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.search.timeout_secs, Some(42));
        assert_eq!(loaded.search.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = load_config(Path::new("/nonexistent/librarycloud-search.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }
}
