use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::adapters::trackers::template::{require_placeholders, ISSUE_ID, TRACKER_NAME};
use crate::domain::models::config::Config;

/// Project configuration file, read from the working directory.
pub const CONFIG_FILE: &str = "timed.yaml";
/// Optional local overrides, read after [`CONFIG_FILE`].
pub const LOCAL_CONFIG_FILE: &str = "timed.local.yaml";
/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TIMED_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid user header: '{0}'")]
    InvalidUserHeader(String),

    #[error("Invalid page sizes: default {default} must be between 1 and max {max}")]
    InvalidPageSize { default: u32, max: u32 },

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidRequestTimeout(u64),

    #[error("Invalid tracker URL template {field}: {reason}")]
    InvalidUrlTemplate { field: &'static str, reason: String },

    #[error("Redmine basic auth is enabled but redmine_basic_auth_user is empty")]
    MissingBasicAuthUser,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `timed.yaml` in the working directory, or `path` when given
    /// 3. `timed.local.yaml` (optional local overrides)
    /// 4. Environment variables (`TIMED_*` prefix, highest priority)
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config: Config = Self::figment(path)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a single file, without local or environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let base = match path {
            Some(path) => Yaml::file(path),
            None => Yaml::file(CONFIG_FILE),
        };

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(base)
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        let header = config.server.user_header.trim();
        if header.is_empty() || !header.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return Err(ConfigError::InvalidUserHeader(config.server.user_header.clone()));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(config.database.max_connections));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        let api = &config.api;
        if api.default_page_size == 0 || api.max_page_size == 0 || api.default_page_size > api.max_page_size {
            return Err(ConfigError::InvalidPageSize {
                default: api.default_page_size,
                max: api.max_page_size,
            });
        }

        let trackers = &config.trackers;
        if trackers.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(trackers.request_timeout_secs));
        }

        let templates = [
            ("github_api_url", &trackers.github_api_url, TRACKER_NAME),
            ("github_issue_url", &trackers.github_issue_url, ISSUE_ID),
            ("redmine_api_url", &trackers.redmine_api_url, TRACKER_NAME),
            ("redmine_issue_url", &trackers.redmine_issue_url, ISSUE_ID),
        ];
        for (field, template, placeholder) in templates {
            require_placeholders(template, &[placeholder])
                .map_err(|reason| ConfigError::InvalidUrlTemplate { field, reason })?;
        }

        if trackers.redmine_basic_auth_enabled && trackers.redmine_basic_auth_user.is_empty() {
            return Err(ConfigError::MissingBasicAuthUser);
        }

        Ok(())
    }
}
