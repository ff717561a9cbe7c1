//! HHV / LLV — highest and lowest value over a trailing window.
//!
//! HHV[t] = max(x[t-period+1..=t]), LLV[t] = min(x[t-period+1..=t]).
//! Lookback: period - 1. A window containing NaN yields NaN.
//!
//! Single pass with a monotonic deque of indices, O(N) regardless of period.

use std::collections::VecDeque;

/// Rolling maximum (HHV).
pub fn hhv(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "HHV period must be >= 1");
    rolling_extreme(values, period, |new, old| new >= old)
}

/// Rolling minimum (LLV).
pub fn llv(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "LLV period must be >= 1");
    rolling_extreme(values, period, |new, old| new <= old)
}

/// `supersedes(new, old)` is true when `old` can never again be the extreme
/// once `new` has entered the window.
fn rolling_extreme(values: &[f64], period: usize, supersedes: impl Fn(f64, f64) -> bool) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    let mut window: VecDeque<usize> = VecDeque::with_capacity(period);
    let mut nan_in_window = 0usize;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            nan_in_window += 1;
        } else {
            while let Some(&back) = window.back() {
                if supersedes(v, values[back]) {
                    window.pop_back();
                } else {
                    break;
                }
            }
            window.push_back(i);
        }

        if i >= period && values[i - period].is_nan() {
            nan_in_window -= 1;
        }
        while let Some(&front) = window.front() {
            if front + period <= i {
                window.pop_front();
            } else {
                break;
            }
        }

        if i + 1 >= period && nan_in_window == 0 {
            if let Some(&front) = window.front() {
                result[i] = values[front];
            }
        }
    }

    result
}
