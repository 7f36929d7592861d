//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Result value that marks a successful submission
    #[serde(default = "default_accepted_label")]
    pub accepted_label: String,

    /// Entries kept on the leaderboard
    #[serde(default = "default_top_n")]
    pub leaderboard_size: usize,

    /// Entries kept in the "most errors" table
    #[serde(default = "default_top_n")]
    pub top_error_users: usize,

    /// Entries kept in the "most attempts on one problem" table
    #[serde(default = "default_top_n")]
    pub top_multi_attempts: usize,

    /// Users shown in the solved matrix
    #[serde(default = "default_heatmap_max_users")]
    pub heatmap_max_users: usize,

    /// Equal-width bins in the score histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_accepted_label() -> String {
    "Accepted".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_heatmap_max_users() -> usize {
    20
}

fn default_histogram_bins() -> usize {
    20
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            accepted_label: default_accepted_label(),
            leaderboard_size: default_top_n(),
            top_error_users: default_top_n(),
            top_multi_attempts: default_top_n(),
            heatmap_max_users: default_heatmap_max_users(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Largest accepted upload body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Sessions kept in memory before the oldest is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_max_sessions() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            max_upload_bytes: default_max_upload_bytes(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }

        if self.server.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "max_sessions must be greater than 0".to_string(),
            ));
        }

        let analysis = &self.analysis;
        if analysis.accepted_label.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "accepted_label must not be empty".to_string(),
            ));
        }

        if analysis.leaderboard_size == 0
            || analysis.heatmap_max_users == 0
            || analysis.histogram_bins == 0
        {
            return Err(ConfigError::ValidationError(
                "leaderboard_size, heatmap_max_users and histogram_bins must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
