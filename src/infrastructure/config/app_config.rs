//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_NAME: &str = "torzhok-bot";
const APP_QUALIFIER: &str = "ru";
const APP_ORGANIZATION: &str = "digital-torzhok";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from TOML and overridden by CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the attractions JSON file.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Log file path; logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Bot API client configuration.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Bot API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API endpoint, without the `/bot<token>` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long polling timeout in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Timeout for regular API calls in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long a chat worker waits for new actions before it stops.
    #[serde(default = "default_worker_idle")]
    pub worker_idle_secs: u64,
}

impl TelegramConfig {
    /// Long polling timeout.
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Timeout for regular API calls.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Idle period after which a chat worker stops.
    #[must_use]
    pub const fn worker_idle(&self) -> Duration {
        Duration::from_secs(self.worker_idle_secs)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
            request_timeout_secs: default_request_timeout(),
            worker_idle_secs: default_worker_idle(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data").join("attractions.json")
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout() -> u64 {
    30
}

const fn default_request_timeout() -> u64 {
    10
}

const fn default_worker_idle() -> u64 {
    300
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(catalog) = &args.catalog {
            self.catalog_path.clone_from(catalog);
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base_url) = &args.api_base_url {
            self.telegram.api_base_url.clone_from(api_base_url);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            log_path: None,
            log_level: LogLevel::Info,
            telegram: TelegramConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            catalog_path = "/srv/bot/attractions.json"
            log_level = "debug"

            [telegram]
            poll_timeout_secs = 50
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(
            config.catalog_path,
            PathBuf::from("/srv/bot/attractions.json")
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.telegram.poll_timeout(), Duration::from_secs(50));
        assert_eq!(config.telegram.api_base_url, "https://api.telegram.org");
        assert_eq!(config.telegram.request_timeout_secs, 10);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.catalog_path, default_catalog_path());
        assert!(config.log_path.is_none());
        assert_eq!(config.telegram.worker_idle(), Duration::from_secs(300));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config: AppConfig = toml::from_str("log_level = \"warn\"").unwrap();
        let args = CliArgs::parse_from([
            "torzhok-bot",
            "--catalog",
            "other.json",
            "--log-level",
            "trace",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.catalog_path, PathBuf::from("other.json"));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert!(config.log_path.is_none());
    }
}
