//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::{SeriesSelector, SpendingPeriod, BASE_BALANCE, DEFAULT_FEED_CAPACITY};
use crate::mock::DEFAULT_MAX_FLUCTUATION;
use crate::scheduler::ScheduleConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Refresh and display settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_transaction_interval")]
    pub transaction_interval_secs: u64,

    #[serde(default = "default_balance_interval")]
    pub balance_interval_secs: u64,

    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,

    #[serde(default = "default_base_balance")]
    pub base_balance: f64,

    #[serde(default = "default_max_fluctuation")]
    pub max_fluctuation: f64,

    #[serde(default = "default_series")]
    pub default_series: String,

    #[serde(default = "default_period")]
    pub default_period: String,
}

fn default_transaction_interval() -> u64 {
    30
}

fn default_balance_interval() -> u64 {
    60
}

fn default_feed_capacity() -> usize {
    DEFAULT_FEED_CAPACITY
}

fn default_base_balance() -> f64 {
    BASE_BALANCE
}

fn default_max_fluctuation() -> f64 {
    DEFAULT_MAX_FLUCTUATION
}

fn default_series() -> String {
    "revenue".to_string()
}

fn default_period() -> String {
    "last_30d".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            transaction_interval_secs: default_transaction_interval(),
            balance_interval_secs: default_balance_interval(),
            feed_capacity: default_feed_capacity(),
            base_balance: default_base_balance(),
            max_fluctuation: default_max_fluctuation(),
            default_series: default_series(),
            default_period: default_period(),
        }
    }
}

impl DashboardConfig {
    /// Timer intervals for the refresh scheduler
    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            transaction_interval: Duration::from_secs(self.transaction_interval_secs.max(1)),
            balance_interval: Duration::from_secs(self.balance_interval_secs.max(1)),
        }
    }

    pub fn series(&self) -> SeriesSelector {
        SeriesSelector::from_key(&self.default_series)
    }

    pub fn period(&self) -> SpendingPeriod {
        SpendingPeriod::from_key(&self.default_period)
    }
}

/// Preference store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("midday").to_string_lossy().to_string())
        .unwrap_or_else(|| "./midday_data".to_string())
}

impl StoreConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
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
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("midday").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
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
        if let Some(data_dir) = var("MIDDAY_DATA_DIR") {
            self.store.data_dir = data_dir;
        }

        if let Some(secs) = var("MIDDAY_TRANSACTION_INTERVAL_SECS") {
            if let Ok(s) = secs.parse() {
                self.dashboard.transaction_interval_secs = s;
            }
        }
        if let Some(secs) = var("MIDDAY_BALANCE_INTERVAL_SECS") {
            if let Ok(s) = secs.parse() {
                self.dashboard.balance_interval_secs = s;
            }
        }

        if let Some(level) = var("MIDDAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MIDDAY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
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
    r#"# Midday Dashboard Configuration
#
# Environment variables override these settings:
# - MIDDAY_DATA_DIR
# - MIDDAY_TRANSACTION_INTERVAL_SECS
# - MIDDAY_BALANCE_INTERVAL_SECS
# - MIDDAY_LOG_LEVEL
# - MIDDAY_LOG_FORMAT

[dashboard]
# How often a new transaction is added to the feed (seconds)
transaction_interval_secs = 30

# How often the account balance is recomputed (seconds)
balance_interval_secs = 60

# Number of transactions kept visible
feed_capacity = 5

# Balance every refresh is computed from
base_balance = 24890.50

# Largest balance change per refresh, in either direction
max_fluctuation = 500.0

# Series charted on start: revenue, profit, expense, burn_rate
default_series = "revenue"

# Spending period on start: last_30d, last_3m, last_6m
default_period = "last_30d"

[store]
# Directory holding store.json (theme preference)
data_dir = "~/.local/share/midday"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dashboard.transaction_interval_secs, 30);
        assert_eq!(config.dashboard.balance_interval_secs, 60);
        assert_eq!(config.dashboard.feed_capacity, 5);
        assert_eq!(config.dashboard.base_balance, 24890.50);
        assert_eq!(config.dashboard.series(), SeriesSelector::Revenue);
        assert_eq!(config.dashboard.period(), SpendingPeriod::Last30Days);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dashboard.transaction_interval_secs, 30);
        assert_eq!(config.dashboard.max_fluctuation, 500.0);
        assert_eq!(config.store.data_dir, "~/.local/share/midday");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
            [dashboard]
            transaction_interval_secs = 5
            default_series = "profit"
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.transaction_interval_secs, 5);
        assert_eq!(config.dashboard.balance_interval_secs, 60);
        assert_eq!(config.dashboard.series(), SeriesSelector::Profit);

        let schedule = config.dashboard.schedule();
        assert_eq!(schedule.transaction_interval, Duration::from_secs(5));
        assert_eq!(schedule.balance_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_data_path_expands_home() {
        let store = StoreConfig {
            data_dir: "/var/lib/midday".to_string(),
        };
        assert_eq!(store.data_path(), PathBuf::from("/var/lib/midday"));

        if let Some(home) = dirs::home_dir() {
            let store = StoreConfig {
                data_dir: "~/.local/share/midday".to_string(),
            };
            assert_eq!(store.data_path(), home.join(".local/share/midday"));
        }
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut config = DashboardConfig::default();
        config.balance_interval_secs = 0;
        assert_eq!(config.schedule().balance_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MIDDAY_DATA_DIR", "/tmp/midday"),
            ("MIDDAY_TRANSACTION_INTERVAL_SECS", "2"),
            ("MIDDAY_BALANCE_INTERVAL_SECS", "not-a-number"),
            ("MIDDAY_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.data_dir, "/tmp/midday");
        assert_eq!(config.dashboard.transaction_interval_secs, 2);
        assert_eq!(config.dashboard.balance_interval_secs, 60);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[dashboard\nfeed_capacity = ").unwrap();
        match Config::load(&bad) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
