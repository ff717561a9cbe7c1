//! End-to-end scenarios for the indicator pipeline.
//!
//! Synthetic bars only: a deterministic random walk, a decline followed by a
//! recovery, and a perfectly flat series.

use chrono::NaiveDate;
use mainforce_core::domain::frame::{CLOSE, HIGH, LOW, OPEN, VOLUME};
use mainforce_core::{
    compute, compute_bars, summarize, Bar, BarFrame, IndexBars, IndicatorKey, SecurityBars,
    TrendStrength, ValidationError,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn frame_from_closes(closes: &[f64], volume: Option<f64>) -> BarFrame {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let n = closes.len();
    let mut frame = BarFrame::new((0..n).map(|i| base + chrono::Duration::days(i as i64)).collect())
        .with_column(OPEN, closes.iter().map(|c| c * 0.998).collect())
        .with_column(HIGH, closes.iter().map(|c| c * 1.01).collect())
        .with_column(LOW, closes.iter().map(|c| c * 0.99).collect())
        .with_column(CLOSE, closes.to_vec());
    if let Some(v) = volume {
        frame.insert(VOLUME, vec![v; n]);
    }
    frame
}

/// Deterministic pseudo-random walk using a simple LCG.
fn random_walk(n: usize, start: f64, salt: u64) -> Vec<f64> {
    let mut price = start;
    (0..n)
        .map(|i| {
            let seed = (i as u64 ^ salt)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let change = ((seed >> 33) % 200) as f64 / 100.0 - 1.0; // -1% .. +1%
            price = (price * (1.0 + change * 0.02)).max(1.0);
            price
        })
        .collect()
}

/// Gentle chop, then ~2%/day decline, then ~1.5%/day recovery.
fn decline_then_recover(warmup: usize, down: usize, up: usize) -> Vec<f64> {
    let mut price = 100.0;
    let mut closes = Vec::with_capacity(warmup + down + up);
    for i in 0..warmup {
        price *= if i % 2 == 0 { 1.004 } else { 0.997 };
        closes.push(price);
    }
    for _ in 0..down {
        price *= 0.98;
        closes.push(price);
    }
    for _ in 0..up {
        price *= 1.015;
        closes.push(price);
    }
    closes
}

fn walk_pair(n: usize) -> (BarFrame, BarFrame) {
    (
        frame_from_closes(&random_walk(n, 25.0, 7), Some(2_000_000.0)),
        frame_from_closes(&random_walk(n, 3_200.0, 11), None),
    )
}

// ── Shape and determinism ────────────────────────────────────────────

#[test]
fn every_series_matches_the_input_axis() {
    let (security, index) = walk_pair(320);
    let bundle = compute(&security, &index).unwrap();

    assert_eq!(bundle.dates(), security.dates.as_slice());
    for key in IndicatorKey::ALL {
        let column = bundle.get(key).unwrap_or_else(|| panic!("{key} missing"));
        assert_eq!(column.len(), 320, "{key}");
        assert_eq!(key.is_flag(), bundle.flags(key).is_some(), "{key}");
    }
}

#[test]
fn compute_is_deterministic() {
    let (security, index) = walk_pair(400);
    let a = compute(&security, &index).unwrap();
    let b = compute(&security, &index).unwrap();

    for key in IndicatorKey::ALL {
        if let (Some(x), Some(y)) = (a.numeric(key), b.numeric(key)) {
            let xb: Vec<u64> = x.iter().map(|v| v.to_bits()).collect();
            let yb: Vec<u64> = y.iter().map(|v| v.to_bits()).collect();
            assert_eq!(xb, yb, "{key} differs between runs");
        } else {
            assert_eq!(a.flags(key), b.flags(key), "{key} differs between runs");
        }
    }
}

#[test]
fn warmed_up_series_are_defined() {
    let (security, index) = walk_pair(300);
    let bundle = compute(&security, &index).unwrap();

    // Longest lookback is C's 240-bar low; everything is live by the end.
    for key in [
        IndicatorKey::V5,
        IndicatorKey::V11,
        IndicatorKey::V12,
        IndicatorKey::Dd,
        IndicatorKey::B4,
        IndicatorKey::C4,
        IndicatorKey::Var22,
        IndicatorKey::Var23,
    ] {
        assert!(bundle.last_value(key).is_finite(), "{key} = {}", bundle.last_value(key));
    }
}

// ── Signals ──────────────────────────────────────────────────────────

#[test]
fn recovery_after_decline_fires_a_buy() {
    let (warmup, down, up) = (30, 30, 10);
    let closes = decline_then_recover(warmup, down, up);
    let security = frame_from_closes(&closes, Some(500_000.0));
    let index = frame_from_closes(&random_walk(closes.len(), 3_000.0, 3), None);
    let bundle = compute(&security, &index).unwrap();

    // Strength sits near the bottom of its range at the end of the decline.
    let v11 = bundle.numeric(IndicatorKey::V11).unwrap();
    assert!(v11[warmup + down - 1] < 13.0, "V11 = {}", v11[warmup + down - 1]);

    let bb1 = bundle.flags(IndicatorKey::Bb1).unwrap();
    let fired: Vec<usize> = (0..bb1.len()).filter(|&i| bb1[i]).collect();
    assert!(
        fired.iter().any(|&i| i >= warmup + down),
        "no buy during the recovery, fired at {fired:?}"
    );

    // Every emitted buy also satisfies the raw condition.
    let raw = bundle.flags(IndicatorKey::BuySignal).unwrap();
    assert!(fired.iter().all(|&i| raw[i]));
}

#[test]
fn emitted_signals_are_debounced() {
    let (security, index) = walk_pair(600);
    let bundle = compute(&security, &index).unwrap();

    for key in [IndicatorKey::Bb1, IndicatorKey::Cc1] {
        let flags = bundle.flags(key).unwrap();
        let fired: Vec<usize> = (0..flags.len()).filter(|&i| flags[i]).collect();
        for pair in fired.windows(2) {
            assert!(pair[1] - pair[0] > 10, "{key} fired at {pair:?}");
        }
    }
}

// ── Degenerate input ─────────────────────────────────────────────────

#[test]
fn flat_prices_do_not_panic() {
    let closes = vec![10.0; 120];
    let bundle = compute(
        &frame_from_closes(&closes, Some(1_000.0)),
        &frame_from_closes(&vec![2_500.0; 120], None),
    )
    .unwrap();

    assert_eq!(bundle.len(), 120);
    // Zero channel width: B4 is 0/0 everywhere it is defined.
    assert!(bundle.numeric(IndicatorKey::B4).unwrap().iter().all(|v| v.is_nan()));
    assert_eq!(bundle.count_true(IndicatorKey::Bb1), 0);

    let summary = summarize(&bundle);
    assert_eq!(summary.current_price, 10.0);
    assert_eq!(summary.trend_strength, TrendStrength::Weak);
}

#[test]
fn missing_columns_are_reported_by_table() {
    let mut security = frame_from_closes(&[10.0, 11.0], Some(100.0));
    let index = frame_from_closes(&[10.0, 11.0], None);
    security.columns.remove(HIGH);

    let err = compute(&security, &index).unwrap_err();
    assert_eq!(err.to_string(), "security bars are missing required column: High");
}

#[test]
fn unordered_dates_are_rejected() {
    let mut security = frame_from_closes(&[10.0, 11.0, 12.0], Some(100.0));
    let index = frame_from_closes(&[10.0, 11.0, 12.0], None);
    security.dates.swap(1, 2);

    let err = compute(&security, &index).unwrap_err();
    assert!(matches!(err, ValidationError::UnorderedDates { position: 2, .. }));
}

#[test]
fn typed_rows_match_frame_input() {
    let closes = random_walk(150, 40.0, 5);
    let index_closes = random_walk(150, 3_000.0, 9);
    let security_frame = frame_from_closes(&closes, Some(10_000.0));
    let index_frame = frame_from_closes(&index_closes, None);

    let rows = |frame: &BarFrame, volume: f64| -> Vec<Bar> {
        (0..frame.len())
            .map(|i| Bar {
                date: frame.dates[i],
                open: frame.column(OPEN).unwrap()[i],
                high: frame.column(HIGH).unwrap()[i],
                low: frame.column(LOW).unwrap()[i],
                close: frame.column(CLOSE).unwrap()[i],
                volume,
            })
            .collect()
    };
    let security = SecurityBars::from_rows(&rows(&security_frame, 10_000.0)).unwrap();
    let index = IndexBars::from_rows(&rows(&index_frame, 0.0)).unwrap();

    // NaN != NaN, so compare the serialized form (NaN renders as null).
    let typed = serde_json::to_string(&compute_bars(&security, &index).unwrap()).unwrap();
    let framed = serde_json::to_string(&compute(&security_frame, &index_frame).unwrap()).unwrap();
    assert_eq!(typed, framed);
}
