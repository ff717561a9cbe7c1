//! Momentum family: V1–VB and the core strength oscillator V11/V12.
//!
//! - V1–V4: MACD-style oscillator of the security's weighted price (×10).
//! - V5–V7: where the index closes inside its 8-bar high/low channel.
//! - V8–VB: the V1–V4 construction applied to the index.
//! - V11/V12: a 55-bar stochastic position, double-smoothed, and the
//!   percentage change of its 3-bar EMA.

use crate::primitives::{ema, hhv, lag, llv, weighted_ema, zip3_with, zip_with};

#[derive(Debug, Clone)]
pub struct SecurityMomentum {
    pub v1: Vec<f64>,
    pub v2: Vec<f64>,
    pub v3: Vec<f64>,
    pub v4: Vec<f64>,
}

/// V1 = (2C + H + L) / 4 × 10; V2 = EMA(V1,13) − EMA(V1,34); V3 = EMA(V2,5);
/// V4 = 2 × (V2 − V3) × 5.5.
pub fn security_momentum(close: &[f64], high: &[f64], low: &[f64]) -> SecurityMomentum {
    let v1 = zip3_with(close, high, low, |c, h, l| (c * 2.0 + h + l) / 4.0 * 10.0);
    let v2 = zip_with(&ema(&v1, 13), &ema(&v1, 34), |fast, slow| fast - slow);
    let v3 = ema(&v2, 5);
    let v4 = zip_with(&v2, &v3, |a, b| 2.0 * (a - b) * 5.5);
    SecurityMomentum { v1, v2, v3, v4 }
}

#[derive(Debug, Clone)]
pub struct IndexChannel {
    pub v5: Vec<f64>,
    pub v6: Vec<f64>,
    pub v7: Vec<f64>,
}

/// V5 = (HHV(IH,8) − IC) / (HHV(IH,8) − LLV(IL,8)) × 8;
/// V6 = EMA(3·V5 − 2·SMA(V5,18,1), 5);
/// V7 = (IC − LLV(IL,8)) / (HHV(IH,8) − LLV(IL,8)) × 10.
pub fn index_channel(index_close: &[f64], index_high: &[f64], index_low: &[f64]) -> IndexChannel {
    let hh = hhv(index_high, 8);
    let ll = llv(index_low, 8);

    let v5 = zip3_with(&hh, index_close, &ll, |hh, c, ll| (hh - c) / (hh - ll) * 8.0);
    let v5_smooth = weighted_ema(&v5, 18, 1.0);
    let v6 = ema(&zip_with(&v5, &v5_smooth, |a, s| 3.0 * a - 2.0 * s), 5);
    let v7 = zip3_with(index_close, &ll, &hh, |c, ll, hh| (c - ll) / (hh - ll) * 10.0);
    IndexChannel { v5, v6, v7 }
}

#[derive(Debug, Clone)]
pub struct IndexMomentum {
    pub v8: Vec<f64>,
    pub v9: Vec<f64>,
    pub va: Vec<f64>,
    pub vb: Vec<f64>,
}

/// V8 = (2·IC + IH + IL) / 4; V9 = EMA(V8,13) − EMA(V8,34); VA = EMA(V9,3);
/// VB = (V9 − VA) / 2.
pub fn index_momentum(index_close: &[f64], index_high: &[f64], index_low: &[f64]) -> IndexMomentum {
    let v8 = zip3_with(index_close, index_high, index_low, |c, h, l| (c * 2.0 + h + l) / 4.0);
    let v9 = zip_with(&ema(&v8, 13), &ema(&v8, 34), |fast, slow| fast - slow);
    let va = ema(&v9, 3);
    let vb = zip_with(&v9, &va, |a, b| (a - b) / 2.0);
    IndexMomentum { v8, v9, va, vb }
}

#[derive(Debug, Clone)]
pub struct Strength {
    pub v11: Vec<f64>,
    pub v12: Vec<f64>,
    /// EMA(V11, 3), the series both buy and sell thresholds are applied to.
    pub v11_ema: Vec<f64>,
}

/// PR = (C − LLV(L,55)) / (HHV(H,55) − LLV(L,55)) × 100;
/// V11 = 3·SMA(PR,5,1) − 2·SMA(SMA(PR,5,1),3,1);
/// V12 = (EMA(V11,3) − REF(EMA(V11,3),1)) / REF(EMA(V11,3),1) × 100.
pub fn strength(close: &[f64], high: &[f64], low: &[f64]) -> Strength {
    let ll = llv(low, 55);
    let hh = hhv(high, 55);
    let position = zip3_with(close, &ll, &hh, |c, ll, hh| (c - ll) / (hh - ll) * 100.0);

    let smooth = weighted_ema(&position, 5, 1.0);
    let double_smooth = weighted_ema(&smooth, 3, 1.0);
    let v11 = zip_with(&smooth, &double_smooth, |a, b| 3.0 * a - 2.0 * b);

    let v11_ema = ema(&v11, 3);
    let prev = lag(&v11_ema, 1);
    let v12 = zip_with(&v11_ema, &prev, |e, p| (e - p) / p * 100.0);

    Strength { v11, v12, v11_ema }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn v1_is_weighted_price_times_ten() {
        let m = security_momentum(&[10.0, 12.0], &[11.0, 13.0], &[9.0, 10.0]);
        // (20 + 11 + 9) / 4 * 10 = 100
        assert_approx(m.v1[0], 100.0, DEFAULT_EPSILON);
        // (24 + 13 + 10) / 4 * 10 = 117.5
        assert_approx(m.v1[1], 117.5, DEFAULT_EPSILON);
        // Both EMAs seed on V1[0], so the oscillator starts at zero.
        assert_eq!(m.v2[0], 0.0);
        assert_eq!(m.v4[0], 0.0);
    }

    #[test]
    fn index_channel_warms_up_over_8_bars() {
        let n = 12;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let ch = index_channel(&close, &high, &low);

        assert!(ch.v5[6].is_nan());
        assert!(ch.v7[6].is_nan());
        // [7]: HHV = 108, LLV = 99, C = 107
        assert_approx(ch.v5[7], (108.0 - 107.0) / 9.0 * 8.0, DEFAULT_EPSILON);
        assert_approx(ch.v7[7], (107.0 - 99.0) / 9.0 * 10.0, DEFAULT_EPSILON);
        // V6 seeds on the first defined V5: 3·V5 − 2·V5 = V5.
        assert_approx(ch.v6[7], ch.v5[7], DEFAULT_EPSILON);
    }

    #[test]
    fn index_momentum_vb_is_half_gap() {
        let close: Vec<f64> = (0..40).map(|i| 50.0 + (i as f64 * 0.3).sin()).collect();
        let m = index_momentum(&close, &close, &close);
        assert_approx(m.v8[5], close[5], DEFAULT_EPSILON);
        for i in 0..40 {
            assert_approx(m.vb[i], (m.v9[i] - m.va[i]) / 2.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn strength_is_nan_until_55_bars() {
        let close: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let s = strength(&close, &high, &low);

        assert!(s.v11[53].is_nan());
        assert!(!s.v11[54].is_nan());
        // V12 needs a prior EMA value.
        assert!(s.v12[54].is_nan());
        assert!(!s.v12[55].is_nan());
    }

    #[test]
    fn strength_first_value_equals_position() {
        // Seeded smoothing: V11 at the first defined bar is 3·PR − 2·PR = PR.
        let close: Vec<f64> = (0..55).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let s = strength(&close, &high, &low);
        // C = 154, LLV(L) = 99, HHV(H) = 155
        let pr = (154.0 - 99.0) / (155.0 - 99.0) * 100.0;
        assert_approx(s.v11[54], pr, 1e-9);
        assert_approx(s.v11_ema[54], pr, 1e-9);
    }
}
