//! Exponential smoothing: EMA (span-based) and the weighted "SMA" variant.
//!
//! Both are the non-adjusted recursive mean:
//!   y[t] = alpha * x[t] + (1 - alpha) * y[t-1]
//! EMA uses alpha = 2 / (period + 1); the weighted form uses alpha = weight / period.
//!
//! Seed: the first non-NaN input (no SMA warm-up, no leading NaN beyond the input's own).
//! A NaN inside the series repeats the previous output; the next observation is
//! blended against the decayed weight accumulated over the gap.

/// Exponential moving average with span-derived decay.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");
    exp_smooth(values, 2.0 / (period as f64 + 1.0))
}

/// Weighted exponential average, alpha = weight / period.
///
/// This is the `SMA(X, N, M)` smoothing from formula-style indicator languages,
/// where `M` is normally 1.
pub fn weighted_ema(values: &[f64], period: usize, weight: f64) -> Vec<f64> {
    assert!(period >= 1, "weighted EMA period must be >= 1");
    assert!(
        weight > 0.0 && weight <= period as f64,
        "weighted EMA weight must be in (0, period]"
    );
    exp_smooth(values, weight / period as f64)
}

fn exp_smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let decay = 1.0 - alpha;
    let mut mean = f64::NAN;
    let mut old_weight = 1.0;

    values
        .iter()
        .map(|&x| {
            let observed = !x.is_nan();
            if !mean.is_nan() {
                old_weight *= decay;
                if observed {
                    if mean != x {
                        mean = (old_weight * mean + alpha * x) / (old_weight + alpha);
                    }
                    old_weight = 1.0;
                }
            } else if observed {
                mean = x;
            }
            mean
        })
        .collect()
}
