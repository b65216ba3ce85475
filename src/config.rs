//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::charts::{ChartOptions, LabelPrecision};
use crate::model::RADAR_TOP_N;
use crate::service::{ServiceConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: RemoteServiceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote analytics service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for RemoteServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl RemoteServiceConfig {
    /// Client settings for [`crate::service::AnalyticsClient`]
    pub fn client_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Local dashboard server and chart configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a page view waits for the chart fetches
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_radar_top_n")]
    pub radar_top_n: usize,

    #[serde(default)]
    pub label_precision: LabelPrecision,

    /// Gap between donut slices, in degrees
    #[serde(default)]
    pub padding_angle: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_radar_top_n() -> usize {
    RADAR_TOP_N
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fetch_timeout_secs: default_fetch_timeout(),
            radar_top_n: default_radar_top_n(),
            label_precision: LabelPrecision::default(),
            padding_angle: 0.0,
        }
    }
}

impl DashboardConfig {
    /// Socket address string for the server
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            label_precision: self.label_precision,
            padding_angle: self.padding_angle.max(0.0),
            radar_top_n: self.radar_top_n,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> String {
        format!("orion={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ORION_SERVICE_URL") {
            self.service.base_url = url;
        }

        if let Some(host) = var("ORION_HOST") {
            self.dashboard.host = host;
        }
        if let Some(port) = var("ORION_PORT") {
            match port.parse() {
                Ok(p) => self.dashboard.port = p,
                Err(_) => tracing::warn!("Ignoring invalid ORION_PORT {:?}", port),
            }
        }

        if let Some(level) = var("ORION_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ORION_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Config file locations, in search order
pub fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("orion").join("config.toml")),
        Some(PathBuf::from("/etc/orion/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Orion Configuration
#
# Environment variables override these settings:
# - ORION_SERVICE_URL
# - ORION_HOST
# - ORION_PORT
# - ORION_LOG_LEVEL
# - ORION_LOG_FORMAT

[service]
# Base origin of the analytics service
base_url = "https://gemini-fastapi-server.onrender.com"

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8090

# How long a page view waits for chart data (seconds)
fetch_timeout_secs = 10

# Number of query types shown on the engagement radar
radar_top_n = 8

# Donut label percentages: "whole" or "tenth"
label_precision = "whole"

# Gap between donut slices, in degrees
padding_angle = 0.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/orion/orion.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dashboard.addr(), "127.0.0.1:8090");
        assert_eq!(config.dashboard.radar_top_n, 8);
        assert_eq!(config.dashboard.chart_options(), ChartOptions::default());
        assert_eq!(config.logging.filter_directive(), "orion=info,tower_http=debug");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.service.base_url, defaults.service.base_url);
        assert_eq!(config.dashboard.port, defaults.dashboard.port);
        assert_eq!(
            config.dashboard.chart_options(),
            defaults.dashboard.chart_options()
        );
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[service]\nbase_url = \"http://localhost:9000\"\n\n[dashboard]\nlabel_precision = \"tenth\"\npadding_angle = 2.5"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.service.base_url, "http://localhost:9000");
        assert_eq!(config.service.request_timeout_secs, 30);
        assert_eq!(config.dashboard.label_precision, LabelPrecision::Tenth);
        assert_eq!(config.dashboard.chart_options().padding_angle, 2.5);
        assert_eq!(config.service.client_config().request_timeout_ms, 30_000);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[dashboard\nport = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ORION_SERVICE_URL", "http://analytics.internal"),
            ("ORION_HOST", "0.0.0.0"),
            ("ORION_PORT", "9999"),
            ("ORION_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.service.base_url, "http://analytics.internal");
        assert_eq!(config.dashboard.addr(), "0.0.0.0:9999");
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "ORION_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.dashboard.port, 8090);
    }
}
