//! Trailing-window aggregates: SUM, mean (MA), COUNT and AVEDEV.
//!
//! Every aggregate is NaN until `period` samples are available, and NaN for
//! any window that contains a NaN input.
//! Lookback: period - 1.

/// Compensated running sum that supports removing values as the window slides.
#[derive(Debug, Clone, Copy, Default)]
struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn remove(&mut self, value: f64) {
        self.add(-value);
    }
}

/// Rolling sum (SUM).
pub fn sum(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "SUM period must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    let mut acc = KahanSum::default();
    let mut nan_in_window = 0usize;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            nan_in_window += 1;
        } else {
            acc.add(v);
        }
        if i >= period {
            let leaving = values[i - period];
            if leaving.is_nan() {
                nan_in_window -= 1;
            } else {
                acc.remove(leaving);
            }
        }
        if i + 1 >= period && nan_in_window == 0 {
            result[i] = acc.sum;
        }
    }

    result
}

/// Rolling arithmetic mean (MA).
pub fn mean(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "MA period must be >= 1");
    let p = period as f64;
    sum(values, period).into_iter().map(|s| s / p).collect()
}

/// Rolling count of true values (COUNT), as `f64` so the warm-up can be NaN.
pub fn count(cond: &[bool], period: usize) -> Vec<f64> {
    assert!(period >= 1, "COUNT period must be >= 1");
    let mut result = vec![f64::NAN; cond.len()];
    let mut trues = 0usize;

    for (i, &c) in cond.iter().enumerate() {
        if c {
            trues += 1;
        }
        if i >= period && cond[i - period] {
            trues -= 1;
        }
        if i + 1 >= period {
            result[i] = trues as f64;
        }
    }

    result
}

/// Rolling mean absolute deviation from the window mean (AVEDEV).
pub fn avedev(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "AVEDEV period must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < period {
        return result;
    }

    let p = period as f64;
    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let centre = window.iter().sum::<f64>() / p;
        result[i] = window.iter().map(|v| (v - centre).abs()).sum::<f64>() / p;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sum_3() {
        let result = sum(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 6.0, DEFAULT_EPSILON);
        assert_approx(result[3], 9.0, DEFAULT_EPSILON);
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sum_recovers_after_nan_leaves_window() {
        let result = sum(&[1.0, f64::NAN, 2.0, 3.0, 4.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 5.0, DEFAULT_EPSILON);
        assert_approx(result[4], 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sum_stays_close_over_long_slide() {
        let values: Vec<f64> = (0..2000)
            .map(|i| if i % 2 == 0 { 1e9 + 0.1 } else { 0.3 })
            .collect();
        let result = sum(&values, 4);
        let last = values[1996..].iter().sum::<f64>();
        assert_approx(result[1999], last, 1e-3);
    }

    #[test]
    fn mean_3() {
        let result = mean(&[3.0, 6.0, 9.0, 12.0], 3);
        assert!(result[1].is_nan());
        assert_approx(result[2], 6.0, DEFAULT_EPSILON);
        assert_approx(result[3], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn count_trues_in_window() {
        let cond = [true, false, true, true, false, false];
        let result = count(&cond, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_eq!(result[2], 2.0);
        assert_eq!(result[3], 2.0);
        assert_eq!(result[4], 2.0);
        assert_eq!(result[5], 1.0);
    }

    #[test]
    fn avedev_known_values() {
        // window [1, 2, 3, 6]: mean 3, |dev| = 2, 1, 0, 3 → 1.5
        let result = avedev(&[1.0, 2.0, 3.0, 6.0], 4);
        assert!(result[2].is_nan());
        assert_approx(result[3], 1.5, DEFAULT_EPSILON);
    }

    #[test]
    fn avedev_of_constant_is_zero() {
        let result = avedev(&[7.0; 20], 14);
        assert_eq!(result[13], 0.0);
        assert_eq!(result[19], 0.0);
    }
}
