//! Configuration management for pickline
//!
//! This module handles loading, parsing, and managing configuration from
//! various sources:
//! - Configuration files (TOML format)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Adapter configuration
    #[serde(default)]
    pub adapter: AdapterConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Adapter-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Candidate count limit for the restricted engine
    ///
    /// Requests whose materialized candidate set is larger than this are
    /// served by the fallback routine instead; interactive cycling over a
    /// huge set would be prohibitively slow. 0 disables the guard.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl AdapterConfig {
    /// The candidate limit as an optional bound.
    ///
    /// # Returns
    /// * `Option<usize>` - The limit, or None when unlimited
    pub fn candidate_limit(&self) -> Option<usize> {
        if self.max_candidates == 0 {
            None
        } else {
            Some(self.max_candidates)
        }
    }
}

/// Prompt history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to a tracing level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions
fn default_max_candidates() -> usize {
    30_000
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pickline_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adapter: AdapterConfig::default(),
            history: HistoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// the default config path is consulted and missing files fall back to
    /// the default configuration.
    ///
    /// # Arguments
    /// * `path` - Optional explicit configuration file path
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::FileNotFound(
                        explicit.display().to_string(),
                    )
                    .into());
                }
                Self::parse_file(explicit)
            }
            None => {
                let default_path = Self::default_config_path();
                match default_path {
                    Some(p) if p.exists() => Self::parse_file(&p),
                    _ => Ok(Self::default()),
                }
            }
        }
    }

    /// The default configuration file location.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pickline").join("config.toml"))
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Validate the configuration.
    ///
    /// # Returns
    /// * `Result<()>` - Ok or the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Generic(format!("Failed to serialize config: {e}")).into())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.adapter.max_candidates, 30_000);
        assert_eq!(config.history.max_size, 1000);
        assert!(config.history.persist);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_candidate_limit_zero_is_unlimited() {
        let mut adapter = AdapterConfig::default();
        assert_eq!(adapter.candidate_limit(), Some(30_000));

        adapter.max_candidates = 0;
        assert_eq!(adapter.candidate_limit(), None);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [adapter]
            max_candidates = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.adapter.max_candidates, 50);
        // Unspecified sections keep their defaults
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [adapter]
            max_candidates = 0

            [history]
            max_size = 200
            file_path = "/tmp/pickline_history"
            persist = false

            [logging]
            level = "debug"
            timestamps = false
            "#,
        )
        .unwrap();

        assert_eq!(config.adapter.candidate_limit(), None);
        assert_eq!(config.history.max_size, 200);
        assert!(!config.history.persist);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.timestamps);
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let result = Config::load_from_file(Some(Path::new("/nonexistent/pickline.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[adapter]\nmax_candidates = 7").unwrap();

        let config = Config::load_from_file(Some(file.path())).unwrap();
        assert_eq!(config.adapter.max_candidates, 7);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();

        assert!(Config::load_from_file(Some(file.path())).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let mut config = Config::default();
        config.history.max_size = 0;
        assert!(config.validate().is_err());
        config.history.max_size = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_toml_contains_sections() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[adapter]"));
        assert!(rendered.contains("max_candidates"));
        assert!(rendered.contains("[logging]"));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
