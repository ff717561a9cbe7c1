//! Indicator pipeline — raw bars in, complete `ResultBundle` out.
//!
//! Stages run in a fixed order, each consuming only earlier outputs:
//! momentum (V1–VB, V11/V12) → price flow (AA–DD) → trend bands (A/B/C) →
//! super-buy preconditions (VAR series) → signals.
//!
//! The only failure is upfront validation of the bars and the config. Past that point every
//! series is produced for every bar, possibly NaN or ±Inf.

pub mod accumulation;
pub mod flow;
pub mod momentum;
pub mod trend;

use crate::bundle::{IndicatorKey, ResultBundle};
use crate::config::EngineConfig;
use crate::domain::{BarFrame, IndexBars, SecurityBars, ValidationError};
use crate::signals;
use accumulation::AccumulationInput;

/// Validate two named-column tables and compute with default thresholds.
pub fn compute(security: &BarFrame, index: &BarFrame) -> Result<ResultBundle, ValidationError> {
    let security = SecurityBars::from_frame(security).map_err(|e| rejected("security", e))?;
    let index = IndexBars::from_frame(index).map_err(|e| rejected("index", e))?;
    compute_bars(&security, &index)
}

/// Compute from validated bars with default thresholds.
pub fn compute_bars(security: &SecurityBars, index: &IndexBars) -> Result<ResultBundle, ValidationError> {
    compute_with(security, index, &EngineConfig::default())
}

/// Compute from validated bars with explicit thresholds.
///
/// The index must already be aligned to the security's calendar, and the
/// config must pass [`EngineConfig::validate`].
#[tracing::instrument(skip_all, fields(bars = security.len()))]
pub fn compute_with(
    security: &SecurityBars,
    index: &IndexBars,
    config: &EngineConfig,
) -> Result<ResultBundle, ValidationError> {
    config.validate().map_err(|e| {
        tracing::warn!(error = %e, "engine config rejected");
        ValidationError::Config(e.to_string())
    })?;
    index
        .ensure_aligned(security)
        .map_err(|e| rejected("index", e))?;

    let (o, h, l, c, vol) = (
        security.open(),
        security.high(),
        security.low(),
        security.close(),
        security.volume(),
    );
    let (ih, il, ic) = (index.high(), index.low(), index.close());

    let sec_momentum = momentum::security_momentum(c, h, l);
    let idx_channel = momentum::index_channel(ic, ih, il);
    let idx_momentum = momentum::index_momentum(ic, ih, il);
    let strength = momentum::strength(c, h, l);

    let flow = flow::price_flow(o, h, l, c, vol);
    let bands = trend::trend_bands(&flow.aa);

    let acc = accumulation::accumulation(&AccumulationInput {
        high: h,
        low: l,
        close: c,
        volume: vol,
        index_high: ih,
        index_low: il,
        index_close: ic,
    });

    let sig = signals::generate(&strength, &acc.var20, &config.signals);
    tracing::debug!(
        buy = sig.buy.iter().filter(|&&f| f).count(),
        sell = sig.sell.iter().filter(|&&f| f).count(),
        super_buy = sig.super_buy.iter().filter(|&&f| f).count(),
        "signals generated"
    );

    use IndicatorKey as K;
    let mut bundle = ResultBundle::new(security.dates().to_vec());

    bundle.insert_numeric(K::V1, sec_momentum.v1);
    bundle.insert_numeric(K::V2, sec_momentum.v2);
    bundle.insert_numeric(K::V3, sec_momentum.v3);
    bundle.insert_numeric(K::V4, sec_momentum.v4);
    bundle.insert_numeric(K::V5, idx_channel.v5);
    bundle.insert_numeric(K::V6, idx_channel.v6);
    bundle.insert_numeric(K::V7, idx_channel.v7);
    bundle.insert_numeric(K::V8, idx_momentum.v8);
    bundle.insert_numeric(K::V9, idx_momentum.v9);
    bundle.insert_numeric(K::Va, idx_momentum.va);
    bundle.insert_numeric(K::Vb, idx_momentum.vb);
    bundle.insert_numeric(K::V11, strength.v11);
    bundle.insert_numeric(K::V12, strength.v12);

    bundle.insert_flags(K::BuySignal, sig.buy_condition);
    bundle.insert_flags(K::Bb1, sig.buy);
    bundle.insert_flags(K::SellSignal, sig.sell_watch);
    bundle.insert_flags(K::Cc1, sig.sell);

    bundle.insert_numeric(K::Aa, flow.aa);
    bundle.insert_numeric(K::Bb, flow.bb);
    bundle.insert_numeric(K::Cc, flow.cc);
    bundle.insert_numeric(K::Dd, flow.dd);

    for (band, keys) in [
        (bands.short, [K::A1, K::A2, K::A3, K::A4]),
        (bands.mid, [K::B1, K::B2, K::B3, K::B4]),
        (bands.long, [K::C1, K::C2, K::C3, K::C4]),
    ] {
        let [high, low, range, position] = keys;
        bundle.insert_numeric(high, band.high);
        bundle.insert_numeric(low, band.low);
        bundle.insert_numeric(range, band.range);
        bundle.insert_numeric(position, band.position);
    }

    bundle.insert_flags(K::Var20, acc.var20);
    bundle.insert_numeric(K::Var22, acc.var22);
    bundle.insert_numeric(K::Var23, acc.var23);
    bundle.insert_flags(K::SuperBuySignal, sig.super_buy);
    bundle.insert_numeric(K::Price, c.to_vec());
    bundle.insert_numeric(K::Volume, vol.to_vec());

    Ok(bundle)
}

fn rejected(table: &'static str, error: ValidationError) -> ValidationError {
    tracing::warn!(table, %error, "input bars rejected");
    error
}
