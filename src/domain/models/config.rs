use serde::{Deserialize, Serialize};
use std::fmt;

/// Main configuration structure for Timed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// List endpoint behaviour
    #[serde(default)]
    pub api: ApiConfig,

    /// External issue tracker settings
    #[serde(default)]
    pub trackers: TrackerSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Header carrying the username set by the authenticating proxy
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_true() -> bool {
    true
}

fn default_user_header() -> String {
    "X-Remote-User".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
            user_header: default_user_header(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".timed/timed.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// List endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

const fn default_page_size() -> u32 {
    25
}

const fn default_max_page_size() -> u32 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Issue tracker endpoints and credentials.
///
/// URL templates use the placeholders `{tracker_name}` and `{issue_id}`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerSettings {
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_github_issue_url")]
    pub github_issue_url: String,

    #[serde(default = "default_redmine_api_url")]
    pub redmine_api_url: String,

    #[serde(default = "default_redmine_issue_url")]
    pub redmine_issue_url: String,

    /// Send HTTP basic auth to Redmine in addition to the API key
    #[serde(default)]
    pub redmine_basic_auth_enabled: bool,

    #[serde(default)]
    pub redmine_basic_auth_user: String,

    #[serde(default)]
    pub redmine_basic_auth_password: String,

    /// Timeout for a single tracker request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retry once when a tracker request fails before any response arrives
    #[serde(default = "default_true")]
    pub retry_on_network_error: bool,
}

fn default_github_api_url() -> String {
    "https://api.github.com/repos/{tracker_name}/issues".to_string()
}

fn default_github_issue_url() -> String {
    "https://github.com/{tracker_name}/issues/{issue_id}".to_string()
}

fn default_redmine_api_url() -> String {
    "https://redmine.example.com/projects/{tracker_name}/issues.json".to_string()
}

fn default_redmine_issue_url() -> String {
    "https://redmine.example.com/issues/{issue_id}".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            github_api_url: default_github_api_url(),
            github_issue_url: default_github_issue_url(),
            redmine_api_url: default_redmine_api_url(),
            redmine_issue_url: default_redmine_issue_url(),
            redmine_basic_auth_enabled: false,
            redmine_basic_auth_user: String::new(),
            redmine_basic_auth_password: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_on_network_error: default_true(),
        }
    }
}

impl fmt::Debug for TrackerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerSettings")
            .field("github_api_url", &self.github_api_url)
            .field("github_issue_url", &self.github_issue_url)
            .field("redmine_api_url", &self.redmine_api_url)
            .field("redmine_issue_url", &self.redmine_issue_url)
            .field("redmine_basic_auth_enabled", &self.redmine_basic_auth_enabled)
            .field("redmine_basic_auth_user", &self.redmine_basic_auth_user)
            .field("redmine_basic_auth_password", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry_on_network_error", &self.retry_on_network_error)
            .finish()
    }
}
