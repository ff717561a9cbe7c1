//! BarFrame — named-column bar table handed over by the data layer.
//!
//! The frame is the loosely-typed boundary: columns are looked up by name and
//! converted into [`SecurityBars`](super::SecurityBars) / [`IndexBars`](super::IndexBars)
//! only after every required column is present and every length matches the
//! date axis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";

/// Which input table a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Security,
    Index,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Security => f.write_str("security"),
            Table::Index => f.write_str("index"),
        }
    }
}

/// Structural problems with the input bars. Raised before any computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{table} bars are missing required column: {column}")]
    MissingColumn { table: Table, column: String },

    #[error("{table} column {column} has {actual} values, expected {expected}")]
    LengthMismatch {
        table: Table,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("{table} dates are not strictly increasing at position {position}")]
    UnorderedDates { table: Table, position: usize },

    #[error("negative volume {value} at position {position}")]
    NegativeVolume { position: usize, value: f64 },

    #[error("index bars ({index}) are not aligned to the security calendar ({security})")]
    AxisMismatch { security: usize, index: usize },

    #[error("invalid engine config: {0}")]
    Config(String),
}

/// Date axis plus arbitrary named `f64` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarFrame {
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl BarFrame {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style column insert.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Fetch a required column, checking presence and length against the date axis.
    pub(crate) fn require(&self, table: Table, name: &str) -> Result<Vec<f64>, ValidationError> {
        let values = self
            .columns
            .get(name)
            .ok_or_else(|| ValidationError::MissingColumn {
                table,
                column: name.to_string(),
            })?;
        if values.len() != self.dates.len() {
            return Err(ValidationError::LengthMismatch {
                table,
                column: name.to_string(),
                expected: self.dates.len(),
                actual: values.len(),
            });
        }
        Ok(values.clone())
    }
}
