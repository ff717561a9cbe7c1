//! CROSS — upward crossover detection.
//!
//! CROSS(a, b)[t] = a[t] > b[t] && a[t-1] <= b[t-1].
//! Always false at t = 0 and wherever any of the four terms is NaN.

/// Crossover of `a` above `b`. Both series must have the same length.
pub fn cross(a: &[f64], b: &[f64]) -> Vec<bool> {
    debug_assert_eq!(a.len(), b.len());
    let mut result = vec![false; a.len()];
    for t in 1..a.len().min(b.len()) {
        result[t] = a[t] > b[t] && a[t - 1] <= b[t - 1];
    }
    result
}

/// Crossover of `a` above a constant level.
pub fn cross_level(a: &[f64], level: f64) -> Vec<bool> {
    let mut result = vec![false; a.len()];
    for t in 1..a.len() {
        result[t] = a[t] > level && a[t - 1] <= level;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_detects_single_transition() {
        let a = [1.0, 2.0, 4.0, 5.0, 2.0, 4.0];
        let b = [3.0; 6];
        assert_eq!(cross(&a, &b), vec![false, false, true, false, false, true]);
    }

    #[test]
    fn touching_then_exceeding_counts() {
        // a[t-1] == b[t-1] qualifies as "at or below".
        assert_eq!(cross_level(&[3.0, 3.5], 3.0), vec![false, true]);
    }

    #[test]
    fn first_bar_never_crosses() {
        assert_eq!(cross_level(&[10.0], 0.0), vec![false]);
    }

    #[test]
    fn nan_never_crosses() {
        let a = [f64::NAN, 5.0, f64::NAN, 1.0, 5.0];
        assert_eq!(
            cross_level(&a, 3.0),
            vec![false, false, false, false, true]
        );
    }
}
