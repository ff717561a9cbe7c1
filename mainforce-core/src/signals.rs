//! Signal generator — buy (BB1), sell (CC1) and super-buy.
//!
//! All three are evaluated per bar from already-computed series for that bar and
//! earlier ones; nothing looks ahead.
//!
//! - Buy: EMA(V11,3) ≤ 13 and V12 > 13, debounced with FILTER(10).
//! - Sell watch: EMA(V11,3) > 60 and rising. Tracked in the bundle but not emitted.
//! - Sell (CC1): EMA(V11,3) ≥ 90 and V12 non-zero (NaN is not), debounced with FILTER(10).
//! - Super-buy: VAR20 crosses above 0.5 (false → true) while COUNT(VAR20,10) == 1.

use crate::bundle::{IndicatorKey, ResultBundle};
use crate::config::SignalConfig;
use crate::domain::TimeSeries;
use crate::pipeline::momentum::Strength;
use crate::primitives::{and, as_numeric, count, cross_level, filter, flag_where, lag};

#[derive(Debug, Clone)]
pub struct Signals {
    pub buy_condition: Vec<bool>,
    pub buy: Vec<bool>,
    pub sell_watch: Vec<bool>,
    pub sell: Vec<bool>,
    pub super_buy: Vec<bool>,
}

pub fn generate(strength: &Strength, var20: &[bool], config: &SignalConfig) -> Signals {
    let e = &strength.v11_ema;
    let v12 = &strength.v12;
    let prev = lag(e, 1);
    let n = e.len();

    let buy_condition = and(
        &flag_where(e, |x| x <= config.buy_level),
        &flag_where(v12, |x| x > config.buy_momentum),
    );
    let buy = filter(&buy_condition, config.debounce_period);

    let sell_watch: Vec<bool> = (0..n)
        .map(|i| e[i] > config.sell_watch_level && e[i] > prev[i])
        .collect();

    // V12 is a truthiness test here, not a threshold. NaN is falsy.
    let sell_condition = and(
        &flag_where(e, |x| x >= config.sell_level),
        &flag_where(v12, |x| x != 0.0 && !x.is_nan()),
    );
    let sell = filter(&sell_condition, config.debounce_period);

    let crossed = cross_level(&as_numeric(var20), 0.5);
    let recent = count(var20, config.super_buy_window);
    let super_buy: Vec<bool> = crossed
        .iter()
        .zip(&recent)
        .map(|(&c, &k)| c && k == 1.0)
        .collect();

    Signals {
        buy_condition,
        buy,
        sell_watch,
        sell,
        super_buy,
    }
}

/// Borrowed view of the emitted signals plus the mid-term trend.
#[derive(Debug, Clone, Copy)]
pub struct SignalSet<'a> {
    pub buy: TimeSeries<'a, bool>,
    pub sell: TimeSeries<'a, bool>,
    pub super_buy: TimeSeries<'a, bool>,
    pub mid_trend: TimeSeries<'a, f64>,
}

impl<'a> SignalSet<'a> {
    /// `None` only for a bundle that was not produced by `compute`.
    pub fn from_bundle(bundle: &'a ResultBundle) -> Option<Self> {
        Some(Self {
            buy: bundle.flag_series(IndicatorKey::Bb1)?,
            sell: bundle.flag_series(IndicatorKey::Cc1)?,
            super_buy: bundle.flag_series(IndicatorKey::SuperBuySignal)?,
            mid_trend: bundle.series(IndicatorKey::B4)?,
        })
    }
}
