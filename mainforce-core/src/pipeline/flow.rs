//! Price-weighted flow: AA–DD.
//!
//! AA is the bar's typical price (O+H+L+C)/4. Volume is split into up/down
//! buckets by whether AA rose or fell against the prior bar, and the 4-bar
//! up/down ratio CC feeds a lagged RSI-style transform DD.

use crate::primitives::{lag, map, mean, sum};

#[derive(Debug, Clone)]
pub struct PriceFlow {
    pub aa: Vec<f64>,
    pub bb: Vec<f64>,
    pub cc: Vec<f64>,
    pub dd: Vec<f64>,
}

/// AA = (O+H+L+C)/4; BB = MA(AA,3);
/// CC = SUM(AA·VOL where AA rose, 4) / SUM(AA·VOL where AA fell, 4);
/// DD = REF(100 − 100/(1+CC), 1).
pub fn price_flow(open: &[f64], high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> PriceFlow {
    let aa: Vec<f64> = (0..close.len())
        .map(|i| (open[i] + high[i] + low[i] + close[i]) / 4.0)
        .collect();
    let bb = mean(&aa, 3);

    let prev = lag(&aa, 1);
    let mut up = vec![0.0; aa.len()];
    let mut down = vec![0.0; aa.len()];
    for i in 0..aa.len() {
        // An unchanged (or NaN) comparison leaves both buckets at zero.
        if aa[i] > prev[i] {
            up[i] = aa[i] * volume[i];
        } else if aa[i] < prev[i] {
            down[i] = aa[i] * volume[i];
        }
    }

    let up_sum = sum(&up, 4);
    let down_sum = sum(&down, 4);
    let cc: Vec<f64> = up_sum.iter().zip(&down_sum).map(|(u, d)| u / d).collect();
    let dd = lag(&map(&cc, |x| 100.0 - 100.0 / (1.0 + x)), 1);

    PriceFlow { aa, bb, cc, dd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn typical_price_and_mean() {
        let o = [1.0, 2.0, 3.0];
        let h = [2.0, 3.0, 4.0];
        let l = [0.0, 1.0, 2.0];
        let c = [1.0, 2.0, 3.0];
        let f = price_flow(&o, &h, &l, &c, &[10.0; 3]);
        assert_eq!(f.aa, vec![1.0, 2.0, 3.0]);
        assert!(f.bb[1].is_nan());
        assert_approx(f.bb[2], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn up_down_ratio() {
        // AA: 10, 11, 12, 11, 13 with volume 1
        // up:   0, 11, 12,  0, 13   down: 0, 0, 0, 11, 0
        // CC[3] = (0+11+12+0) / (0+0+0+11) = 23/11
        // CC[4] = (11+12+0+13) / (0+0+11+0) = 36/11
        let aa = [10.0, 11.0, 12.0, 11.0, 13.0];
        let f = price_flow(&aa, &aa, &aa, &aa, &[1.0; 5]);
        assert!(f.cc[2].is_nan());
        assert_approx(f.cc[3], 23.0 / 11.0, DEFAULT_EPSILON);
        assert_approx(f.cc[4], 36.0 / 11.0, DEFAULT_EPSILON);

        // DD lags the RSI-style transform by one bar.
        assert!(f.dd[3].is_nan());
        assert_approx(f.dd[4], 100.0 - 100.0 / (1.0 + 23.0 / 11.0), DEFAULT_EPSILON);
    }

    #[test]
    fn no_falling_bars_divides_by_zero() {
        let aa = [1.0, 2.0, 3.0, 4.0, 5.0];
        let f = price_flow(&aa, &aa, &aa, &aa, &[1.0; 5]);
        assert_eq!(f.cc[4], f64::INFINITY);
    }
}
