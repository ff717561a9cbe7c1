//! Latest-bar snapshot of a result bundle.
//!
//! NaN values are passed through untouched and flags default to false, so an
//! empty or warming-up bundle still yields a `Summary`. Display-side
//! sanitizing belongs to the caller.

use crate::bundle::{IndicatorKey, ResultBundle};
use crate::config::TrendConfig;
use serde::{Deserialize, Serialize};

/// Coarse label for the mid-term trend position (B4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Medium,
    Weak,
}

impl TrendStrength {
    /// Classify a B4 value. NaN is weak.
    pub fn classify(b4: f64, config: &TrendConfig) -> Self {
        if b4 > config.strong_above {
            TrendStrength::Strong
        } else if b4 > config.medium_above {
            TrendStrength::Medium
        } else {
            TrendStrength::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendStrength::Strong => "strong",
            TrendStrength::Medium => "medium",
            TrendStrength::Weak => "weak",
        }
    }
}

impl std::fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub current_price: f64,
    pub mid_trend_value: f64,
    pub v11_value: f64,
    pub v12_value: f64,
    pub buy_signal_active: bool,
    pub sell_signal_active: bool,
    pub super_buy_signal_active: bool,
    pub trend_strength: TrendStrength,
}

/// Summarize the last bar with the default trend cut points.
pub fn summarize(bundle: &ResultBundle) -> Summary {
    summarize_with(bundle, &TrendConfig::default())
}

pub fn summarize_with(bundle: &ResultBundle, config: &TrendConfig) -> Summary {
    let mid_trend_value = bundle.last_value(IndicatorKey::B4);
    Summary {
        current_price: bundle.last_value(IndicatorKey::Price),
        mid_trend_value,
        v11_value: bundle.last_value(IndicatorKey::V11),
        v12_value: bundle.last_value(IndicatorKey::V12),
        buy_signal_active: bundle.last_flag(IndicatorKey::Bb1),
        sell_signal_active: bundle.last_flag(IndicatorKey::Cc1),
        super_buy_signal_active: bundle.last_flag(IndicatorKey::SuperBuySignal),
        trend_strength: TrendStrength::classify(mid_trend_value, config),
    }
}
