//! FILTER — signal debounce.
//!
//! FILTER(cond, period)[t] = cond[t] && !any(cond[t-period..t-1]).
//! Suppression looks at the raw input, so a continuous run of trues yields only
//! its first bar, and the next true must come more than `period` bars after the
//! last raw true. O(N): only the index of the most recent raw true is tracked.

/// Debounce `cond` over a trailing window of `period` bars.
pub fn filter(cond: &[bool], period: usize) -> Vec<bool> {
    let mut last_true: Option<usize> = None;
    cond.iter()
        .enumerate()
        .map(|(t, &c)| {
            let suppressed = matches!(last_true, Some(prev) if t - prev <= period);
            if c {
                last_true = Some(t);
            }
            c && !suppressed
        })
        .collect()
}
