//! Primitive time-series operators.
//!
//! Every operator is a pure function from one or two series to a new series of
//! the same length. Nothing here mutates its input or keeps state between calls.
//! NaN propagates through arithmetic; rolling windows that are short or contain
//! NaN yield NaN.
//!
//! The formula-language names are kept in the docs (EMA, SMA, HHV, LLV, REF,
//! CROSS, FILTER, COUNT, SUM, MA, AVEDEV, BARSCOUNT) so the pipeline reads like
//! the formulas it implements.

pub mod cross;
pub mod extrema;
pub mod filter;
pub mod rolling;
pub mod shift;
pub mod smoothing;

pub use cross::{cross, cross_level};
pub use extrema::{hhv, llv};
pub use filter::filter;
pub use rolling::{avedev, count, mean, sum};
pub use shift::{bars_count, lag};
pub use smoothing::{ema, weighted_ema};

/// Element-wise map over one series.
pub fn map(a: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    a.iter().map(|&x| f(x)).collect()
}

/// Element-wise combination of two equal-length series.
pub fn zip_with(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Element-wise combination of three equal-length series.
pub fn zip3_with(a: &[f64], b: &[f64], c: &[f64], f: impl Fn(f64, f64, f64) -> f64) -> Vec<f64> {
    debug_assert!(a.len() == b.len() && b.len() == c.len());
    a.iter()
        .zip(b)
        .zip(c)
        .map(|((&x, &y), &z)| f(x, y, z))
        .collect()
}

/// Element-wise predicate; comparisons involving NaN are false.
pub fn flag_where(a: &[f64], pred: impl Fn(f64) -> bool) -> Vec<bool> {
    a.iter().map(|&x| pred(x)).collect()
}

/// Element-wise logical AND of two equal-length flag series.
pub fn and(a: &[bool], b: &[bool]) -> Vec<bool> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

/// Flags as 0.0 / 1.0, for feeding boolean series into numeric operators.
pub fn as_numeric(flags: &[bool]) -> Vec<f64> {
    flags.iter().map(|&f| if f { 1.0 } else { 0.0 }).collect()
}

/// `max(x, 0)` that keeps NaN, unlike `f64::max`.
pub fn positive_part(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else {
        x.max(0.0)
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for operator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
