//! REF (lag) and BARSCOUNT (positional index).

/// Value `periods` bars ago (REF). The first `periods` outputs are NaN.
pub fn lag(values: &[f64], periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if periods < n {
        result[periods..].copy_from_slice(&values[..n - periods]);
    }
    result
}

/// 1-based running bar number, 1..=len. Purely positional.
pub fn bars_count(len: usize) -> Vec<f64> {
    (1..=len).map(|i| i as f64).collect()
}
