//! Bars — validated column sets for the security and the reference index.
//!
//! Both types store one `Vec<f64>` per field over a shared date axis. The index
//! is expected to be reindexed onto the security's trading calendar by the caller;
//! [`IndexBars::ensure_aligned`] only checks that this has happened.

use super::frame::{BarFrame, Table, ValidationError, CLOSE, HIGH, LOW, OPEN, VOLUME};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One OHLCV observation. Index rows leave `volume` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// The security's daily OHLCV series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityBars {
    dates: Vec<NaiveDate>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl SecurityBars {
    pub fn new(
        dates: Vec<NaiveDate>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        let n = dates.len();
        for (name, col) in [
            (OPEN, &open),
            (HIGH, &high),
            (LOW, &low),
            (CLOSE, &close),
            (VOLUME, &volume),
        ] {
            check_len(Table::Security, name, n, col.len())?;
        }
        check_dates(Table::Security, &dates)?;
        if let Some((position, &value)) = volume.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(ValidationError::NegativeVolume { position, value });
        }
        Ok(Self {
            dates,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Build from a named-column frame; requires Open, High, Low, Close and Volume.
    pub fn from_frame(frame: &BarFrame) -> Result<Self, ValidationError> {
        let t = Table::Security;
        Self::new(
            frame.dates.clone(),
            frame.require(t, OPEN)?,
            frame.require(t, HIGH)?,
            frame.require(t, LOW)?,
            frame.require(t, CLOSE)?,
            frame.require(t, VOLUME)?,
        )
    }

    pub fn from_rows(rows: &[Bar]) -> Result<Self, ValidationError> {
        Self::new(
            rows.iter().map(|b| b.date).collect(),
            rows.iter().map(|b| b.open).collect(),
            rows.iter().map(|b| b.high).collect(),
            rows.iter().map(|b| b.low).collect(),
            rows.iter().map(|b| b.close).collect(),
            rows.iter().map(|b| b.volume).collect(),
        )
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The reference index's daily OHLC series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexBars {
    dates: Vec<NaiveDate>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl IndexBars {
    pub fn new(
        dates: Vec<NaiveDate>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        let n = dates.len();
        for (name, col) in [(OPEN, &open), (HIGH, &high), (LOW, &low), (CLOSE, &close)] {
            check_len(Table::Index, name, n, col.len())?;
        }
        check_dates(Table::Index, &dates)?;
        Ok(Self {
            dates,
            open,
            high,
            low,
            close,
        })
    }

    /// Build from a named-column frame; requires Open, High, Low and Close.
    /// Any extra columns (including Volume) are ignored.
    pub fn from_frame(frame: &BarFrame) -> Result<Self, ValidationError> {
        let t = Table::Index;
        Self::new(
            frame.dates.clone(),
            frame.require(t, OPEN)?,
            frame.require(t, HIGH)?,
            frame.require(t, LOW)?,
            frame.require(t, CLOSE)?,
        )
    }

    pub fn from_rows(rows: &[Bar]) -> Result<Self, ValidationError> {
        Self::new(
            rows.iter().map(|b| b.date).collect(),
            rows.iter().map(|b| b.open).collect(),
            rows.iter().map(|b| b.high).collect(),
            rows.iter().map(|b| b.low).collect(),
            rows.iter().map(|b| b.close).collect(),
        )
    }

    /// Check that this index shares the security's date axis exactly.
    pub fn ensure_aligned(&self, security: &SecurityBars) -> Result<(), ValidationError> {
        if self.dates != security.dates {
            return Err(ValidationError::AxisMismatch {
                security: security.len(),
                index: self.len(),
            });
        }
        Ok(())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

fn check_len(table: Table, column: &str, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::LengthMismatch {
            table,
            column: column.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_dates(table: Table, dates: &[NaiveDate]) -> Result<(), ValidationError> {
    match dates.windows(2).position(|w| w[0] >= w[1]) {
        Some(i) => Err(ValidationError::UnorderedDates {
            table,
            position: i + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(i: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Duration::days(i)
    }

    fn sample_rows(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| Bar {
                date: day(i as i64),
                open: 100.0,
                high: 105.0,
                low: 98.0,
                close: 103.0,
                volume: 50_000.0,
            })
            .collect()
    }

    #[test]
    fn security_from_rows() {
        let bars = SecurityBars::from_rows(&sample_rows(3)).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars.close(), &[103.0, 103.0, 103.0]);
        assert_eq!(bars.volume()[2], 50_000.0);
    }

    #[test]
    fn security_rejects_negative_volume() {
        let mut rows = sample_rows(3);
        rows[1].volume = -1.0;
        let err = SecurityBars::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeVolume {
                position: 1,
                value: -1.0
            }
        );
    }

    #[test]
    fn security_rejects_duplicate_dates() {
        let mut rows = sample_rows(3);
        rows[2].date = rows[1].date;
        let err = SecurityBars::from_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnorderedDates { position: 2, .. }
        ));
    }

    #[test]
    fn security_frame_requires_volume() {
        let frame = BarFrame::new(vec![day(0)])
            .with_column(OPEN, vec![1.0])
            .with_column(HIGH, vec![1.0])
            .with_column(LOW, vec![1.0])
            .with_column(CLOSE, vec![1.0]);
        let err = SecurityBars::from_frame(&frame).unwrap_err();
        assert!(matches!(err, ValidationError::MissingColumn { ref column, .. } if column == "Volume"));
        // The same frame is a valid index table.
        assert!(IndexBars::from_frame(&frame).is_ok());
    }

    #[test]
    fn index_alignment_check() {
        let security = SecurityBars::from_rows(&sample_rows(3)).unwrap();
        let index = IndexBars::from_rows(&sample_rows(3)).unwrap();
        assert!(index.ensure_aligned(&security).is_ok());

        let short = IndexBars::from_rows(&sample_rows(2)).unwrap();
        assert_eq!(
            short.ensure_aligned(&security).unwrap_err(),
            ValidationError::AxisMismatch {
                security: 3,
                index: 2
            }
        );
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_rows(1)[0];
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
