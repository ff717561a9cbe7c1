//! Super-buy preconditions: VAR10–VAR23.
//!
//! Volume × 100 stands in for the float capital, so VAR10 is a low-price estimate
//! blending today's and yesterday's discounted lows by turnover. The remaining
//! terms are directional-momentum ratios (6, 7, 13 bars), a 60-bar channel
//! position, 15/14-bar stochastic oscillators on the security and the index,
//! the drawdown from the 30-bar high, and two CCI-style z-scores (14, 70).
//!
//! VAR20 is the conjunction of nine threshold tests; all must hold on the bar.

use crate::primitives::{
    avedev, bars_count, ema, hhv, lag, llv, map, mean, positive_part, weighted_ema, zip3_with,
    zip_with,
};

/// Capital proxy multiplier applied to volume.
const CAPITAL_PER_VOLUME: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Accumulation {
    pub var11: Vec<f64>,
    pub var15: Vec<f64>,
    pub var16: Vec<f64>,
    pub var17: Vec<f64>,
    pub var18: Vec<f64>,
    pub var19: Vec<f64>,
    pub var1b: Vec<f64>,
    pub var1e: Vec<f64>,
    pub var1f: Vec<f64>,
    pub var20: Vec<bool>,
    pub var22: Vec<f64>,
    pub var23: Vec<f64>,
}

/// Inputs borrowed from the security and index bars.
pub struct AccumulationInput<'a> {
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
    pub volume: &'a [f64],
    pub index_high: &'a [f64],
    pub index_low: &'a [f64],
    pub index_close: &'a [f64],
}

pub fn accumulation(input: &AccumulationInput<'_>) -> Accumulation {
    let AccumulationInput {
        high,
        low,
        close,
        volume,
        index_high,
        index_low,
        index_close,
    } = *input;
    let n = close.len();

    // VAR10 = (0.9·L·VOL + 0.9·REF(L,1)·(CAPITAL − VOL)) / CAPITAL
    let vare = map(&lag(low, 1), |x| x * 0.9);
    let varf = map(low, |x| x * 0.9);
    let var10: Vec<f64> = (0..n)
        .map(|i| {
            let capital = volume[i] * CAPITAL_PER_VOLUME;
            (varf[i] * volume[i] + vare[i] * (capital - volume[i])) / capital
        })
        .collect();
    let var11 = ema(&var10, 30);

    let var12 = zip_with(close, &lag(close, 1), |c, p| c - p);
    let var13 = map(&var12, positive_part);
    let var14 = map(&var12, f64::abs);
    let up_ratio = |period: usize| {
        zip_with(
            &weighted_ema(&var13, period, 1.0),
            &weighted_ema(&var14, period, 1.0),
            |up, all| up / all * 100.0,
        )
    };
    let var15 = up_ratio(7);
    let var16 = up_ratio(13);
    let var17 = bars_count(n);
    let var18 = up_ratio(6);

    // VAR19 = −200·(HHV(H,60) − C) / (HHV(H,60) − LLV(L,60)) + 100
    let hh60 = hhv(high, 60);
    let ll60 = llv(low, 60);
    let var19 = zip3_with(&hh60, close, &ll60, |hh, c, ll| -200.0 * (hh - c) / (hh - ll) + 100.0);

    let hh15 = hhv(high, 15);
    let ll15 = llv(low, 15);
    let var1a = zip3_with(close, &ll15, &hh15, |c, ll, hh| (c - ll) / (hh - ll) * 100.0);
    let var1b = weighted_ema(
        &map(&weighted_ema(&var1a, 4, 1.0), |x| (x - 50.0) * 2.0),
        3,
        1.0,
    );

    let ihh14 = hhv(index_high, 14);
    let ill14 = llv(index_low, 14);
    let var1c = zip3_with(index_close, &ill14, &ihh14, |c, ll, hh| (c - ll) / (hh - ll) * 100.0);
    let var1d = weighted_ema(&var1c, 4, 1.0);
    let var1e = weighted_ema(&var1d, 3, 1.0);

    let hh30 = hhv(high, 30);
    let var1f = zip_with(&hh30, close, |hh, c| (hh - c) / c * 100.0);

    let var20: Vec<bool> = (0..n)
        .map(|i| {
            var18[i] <= 25.0
                && var19[i] < -95.0
                && var1f[i] > 20.0
                && var1b[i] < -30.0
                && var1e[i] < 30.0
                && var11[i] - close[i] >= -0.25
                && var15[i] < 22.0
                && var16[i] < 28.0
                && var17[i] > 50.0
        })
        .collect();

    let var21 = zip3_with(high, low, close, |h, l, c| (h + l + c) / 3.0);
    let var22 = cci(&var21, 14);
    let var23 = cci(&var21, 70);

    Accumulation {
        var11,
        var15,
        var16,
        var17,
        var18,
        var19,
        var1b,
        var1e,
        var1f,
        var20,
        var22,
        var23,
    }
}

/// (X − MA(X,N)) / (0.015 × AVEDEV(X,N))
fn cci(typical: &[f64], period: usize) -> Vec<f64> {
    zip3_with(typical, &mean(typical, period), &avedev(typical, period), |x, m, d| {
        (x - m) / (0.015 * d)
    })
}
