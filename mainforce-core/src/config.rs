//! Engine configuration — signal thresholds, trend bands, report limits.
//!
//! Stored as TOML. Every field has a default, and the defaults are the values the
//! indicator formulas were published with, so an empty file (or
//! `EngineConfig::default()`) reproduces the reference signals exactly.
//!
//! ```toml
//! [signals]
//! buy_level = 13.0
//! debounce_period = 10
//!
//! [trend]
//! strong_above = 70.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Thresholds for the buy / sell / super-buy generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Buy when EMA(V11, 3) is at or below this level...
    pub buy_level: f64,
    /// ...and V12 is strictly above this.
    pub buy_momentum: f64,
    /// Emitted sell fires when EMA(V11, 3) reaches this level.
    pub sell_level: f64,
    /// Auxiliary sell-watch condition level (tracked, never emitted).
    pub sell_watch_level: f64,
    /// FILTER window shared by buy and sell.
    pub debounce_period: usize,
    /// COUNT window gating the super-buy crossover.
    pub super_buy_window: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            buy_level: 13.0,
            buy_momentum: 13.0,
            sell_level: 90.0,
            sell_watch_level: 60.0,
            debounce_period: 10,
            super_buy_window: 10,
        }
    }
}

/// Cut points on the mid-term trend (B4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// "strong" when B4 is strictly above.
    pub strong_above: f64,
    /// "medium" when B4 is strictly above (and not strong).
    pub medium_above: f64,
    /// Report direction is rising above this.
    pub rising_above: f64,
    /// Report direction is falling below this.
    pub falling_below: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            strong_above: 70.0,
            medium_above: 30.0,
            rising_above: 50.0,
            falling_below: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Most recent signal events kept in a timeline.
    pub recent_signal_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recent_signal_limit: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub signals: SignalConfig,
    pub trend: TrendConfig,
    pub report: ReportConfig,
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signals.debounce_period == 0 {
            return Err(ConfigError::Invalid(
                "signals.debounce_period must be >= 1".into(),
            ));
        }
        if self.signals.super_buy_window == 0 {
            return Err(ConfigError::Invalid(
                "signals.super_buy_window must be >= 1".into(),
            ));
        }
        if self.trend.medium_above > self.trend.strong_above {
            return Err(ConfigError::Invalid(format!(
                "trend.medium_above ({}) exceeds trend.strong_above ({})",
                self.trend.medium_above, self.trend.strong_above
            )));
        }
        Ok(())
    }
}
