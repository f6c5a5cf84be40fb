use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Prefix of environment variables that override config values.
pub const ENV_PREFIX: &str = "GITLAB2JIRA_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load config from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Invalid per_page: {0}. Must be between 1 and 100")]
    InvalidPerPage(u32),

    #[error("Invalid discussion_concurrency: {0}. Must be between 1 and 32")]
    InvalidConcurrency(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific file
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The JSON config file, which must exist
    /// 3. Environment variables (`GITLAB2JIRA_*` prefix, `__` separates
    ///    nested keys, e.g. `GITLAB2JIRA_SOURCE__GROUP`)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let config: Config = Self::figment(path)
            .extract()
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The provider stack used by [`load_from_file`](Self::load_from_file).
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate the supplemental settings.
    ///
    /// The token and lookup tables are taken as-is: an empty token
    /// surfaces as a remote error, and unmapped issues abort the run later.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !(1..=100).contains(&config.source.per_page) {
            return Err(ConfigError::InvalidPerPage(config.source.per_page));
        }

        if !(1..=32).contains(&config.discussion_concurrency) {
            return Err(ConfigError::InvalidConcurrency(config.discussion_concurrency));
        }

        if config.source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "source.base_url cannot be empty".to_string(),
            ));
        }

        if config.source.group.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "source.group cannot be empty".to_string(),
            ));
        }

        if config.export.path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "export.path cannot be empty".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
