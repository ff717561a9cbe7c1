//! Trend bands A/B/C — channel position of AA over (high, low) period pairs.
//!
//! X1 = HHV(AA, high_period), X2 = LLV(AA, low_period), X3 = X1 − X2,
//! X4 = EMA((AA − X2) / X3, 1) × 100.
//! A uses (10, 30), B uses (16, 90) and is the mid-term trend, C uses (30, 240).
//! A flat channel makes X3 zero and X4 NaN; that is a value, not an error.

use crate::primitives::{ema, hhv, llv, map, zip3_with, zip_with};

#[derive(Debug, Clone)]
pub struct TrendBand {
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub range: Vec<f64>,
    pub position: Vec<f64>,
}

pub fn trend_band(aa: &[f64], high_period: usize, low_period: usize) -> TrendBand {
    let high = hhv(aa, high_period);
    let low = llv(aa, low_period);
    let range = zip_with(&high, &low, |h, l| h - l);
    let raw = zip3_with(aa, &low, &range, |a, l, r| (a - l) / r);
    let position = map(&ema(&raw, 1), |x| x * 100.0);
    TrendBand {
        high,
        low,
        range,
        position,
    }
}

#[derive(Debug, Clone)]
pub struct TrendBands {
    /// A1–A4: (10, 30).
    pub short: TrendBand,
    /// B1–B4: (16, 90), the mid-term trend.
    pub mid: TrendBand,
    /// C1–C4: (30, 240).
    pub long: TrendBand,
}

pub fn trend_bands(aa: &[f64]) -> TrendBands {
    TrendBands {
        short: trend_band(aa, 10, 30),
        mid: trend_band(aa, 16, 90),
        long: trend_band(aa, 30, 240),
    }
}
