//! Engine configuration
//!
//! Loaded from a JSON file. Every field is optional; missing fields take
//! their defaults. The journal capacity is fixed and not configurable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::AnalyticsConfig;
use crate::observability::{Logger, Severity};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// "trace", "info", "warn" or "error"
    pub log_level: String,

    /// Window used by `recent` when none is given
    pub recent_window_secs: u64,

    pub analytics: AnalyticsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            recent_window_secs: 300,
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.severity()?;

        let windows = [
            ("recent_window_secs", self.recent_window_secs),
            ("analytics.window_secs", self.analytics.window_secs),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
            }
        }

        let analytics = &self.analytics;
        let checks = [
            ("analytics.rapid_network_threshold", analytics.rapid_network_threshold),
            ("analytics.burst_threshold", analytics.burst_threshold),
            (
                "analytics.repeating_validation_threshold",
                analytics.repeating_validation_threshold,
            ),
            ("analytics.trend_slice", analytics.trend_slice),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
            }
        }

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Apply process-wide settings (log level)
    pub fn apply(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }

    pub fn recent_window(&self) -> chrono::Duration {
        i64::try_from(self.recent_window_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}
