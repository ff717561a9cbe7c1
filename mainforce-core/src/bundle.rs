//! ResultBundle — every derived series of one computation, keyed by name.
//!
//! Built once per `compute` call and immutable afterwards. All columns share the
//! security's date axis, stored once on the bundle.

use crate::domain::TimeSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed vocabulary of bundle keys. Serialized under the formula names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    #[serde(rename = "VA")]
    Va,
    #[serde(rename = "VB")]
    Vb,
    V11,
    V12,
    #[serde(rename = "buy_signal")]
    BuySignal,
    #[serde(rename = "BB1")]
    Bb1,
    #[serde(rename = "sell_signal")]
    SellSignal,
    #[serde(rename = "CC1")]
    Cc1,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "DD")]
    Dd,
    A1,
    A2,
    A3,
    A4,
    B1,
    B2,
    B3,
    B4,
    C1,
    C2,
    C3,
    C4,
    #[serde(rename = "VAR20")]
    Var20,
    #[serde(rename = "VAR22")]
    Var22,
    #[serde(rename = "VAR23")]
    Var23,
    #[serde(rename = "super_buy_signal")]
    SuperBuySignal,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "volume")]
    Volume,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 39] = [
        IndicatorKey::V1,
        IndicatorKey::V2,
        IndicatorKey::V3,
        IndicatorKey::V4,
        IndicatorKey::V5,
        IndicatorKey::V6,
        IndicatorKey::V7,
        IndicatorKey::V8,
        IndicatorKey::V9,
        IndicatorKey::Va,
        IndicatorKey::Vb,
        IndicatorKey::V11,
        IndicatorKey::V12,
        IndicatorKey::BuySignal,
        IndicatorKey::Bb1,
        IndicatorKey::SellSignal,
        IndicatorKey::Cc1,
        IndicatorKey::Aa,
        IndicatorKey::Bb,
        IndicatorKey::Cc,
        IndicatorKey::Dd,
        IndicatorKey::A1,
        IndicatorKey::A2,
        IndicatorKey::A3,
        IndicatorKey::A4,
        IndicatorKey::B1,
        IndicatorKey::B2,
        IndicatorKey::B3,
        IndicatorKey::B4,
        IndicatorKey::C1,
        IndicatorKey::C2,
        IndicatorKey::C3,
        IndicatorKey::C4,
        IndicatorKey::Var20,
        IndicatorKey::Var22,
        IndicatorKey::Var23,
        IndicatorKey::SuperBuySignal,
        IndicatorKey::Price,
        IndicatorKey::Volume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKey::V1 => "V1",
            IndicatorKey::V2 => "V2",
            IndicatorKey::V3 => "V3",
            IndicatorKey::V4 => "V4",
            IndicatorKey::V5 => "V5",
            IndicatorKey::V6 => "V6",
            IndicatorKey::V7 => "V7",
            IndicatorKey::V8 => "V8",
            IndicatorKey::V9 => "V9",
            IndicatorKey::Va => "VA",
            IndicatorKey::Vb => "VB",
            IndicatorKey::V11 => "V11",
            IndicatorKey::V12 => "V12",
            IndicatorKey::BuySignal => "buy_signal",
            IndicatorKey::Bb1 => "BB1",
            IndicatorKey::SellSignal => "sell_signal",
            IndicatorKey::Cc1 => "CC1",
            IndicatorKey::Aa => "AA",
            IndicatorKey::Bb => "BB",
            IndicatorKey::Cc => "CC",
            IndicatorKey::Dd => "DD",
            IndicatorKey::A1 => "A1",
            IndicatorKey::A2 => "A2",
            IndicatorKey::A3 => "A3",
            IndicatorKey::A4 => "A4",
            IndicatorKey::B1 => "B1",
            IndicatorKey::B2 => "B2",
            IndicatorKey::B3 => "B3",
            IndicatorKey::B4 => "B4",
            IndicatorKey::C1 => "C1",
            IndicatorKey::C2 => "C2",
            IndicatorKey::C3 => "C3",
            IndicatorKey::C4 => "C4",
            IndicatorKey::Var20 => "VAR20",
            IndicatorKey::Var22 => "VAR22",
            IndicatorKey::Var23 => "VAR23",
            IndicatorKey::SuperBuySignal => "super_buy_signal",
            IndicatorKey::Price => "price",
            IndicatorKey::Volume => "volume",
        }
    }

    /// Look a key up by its formula name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether the key holds a boolean series rather than a numeric one.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            IndicatorKey::BuySignal
                | IndicatorKey::Bb1
                | IndicatorKey::SellSignal
                | IndicatorKey::Cc1
                | IndicatorKey::Var20
                | IndicatorKey::SuperBuySignal
        )
    }
}

impl std::fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    Numeric(Vec<f64>),
    Flags(Vec<bool>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Flags(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    dates: Vec<NaiveDate>,
    series: BTreeMap<IndicatorKey, Column>,
}

impl ResultBundle {
    pub(crate) fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            series: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_numeric(&mut self, key: IndicatorKey, values: Vec<f64>) {
        debug_assert!(!key.is_flag(), "{key} is a flag series");
        debug_assert_eq!(values.len(), self.dates.len(), "{key} length");
        self.series.insert(key, Column::Numeric(values));
    }

    pub(crate) fn insert_flags(&mut self, key: IndicatorKey, values: Vec<bool>) {
        debug_assert!(key.is_flag(), "{key} is a numeric series");
        debug_assert_eq!(values.len(), self.dates.len(), "{key} length");
        self.series.insert(key, Column::Flags(values));
    }

    /// The shared date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.series.keys().copied()
    }

    pub fn get(&self, key: IndicatorKey) -> Option<&Column> {
        self.series.get(&key)
    }

    pub fn numeric(&self, key: IndicatorKey) -> Option<&[f64]> {
        match self.series.get(&key)? {
            Column::Numeric(v) => Some(v),
            Column::Flags(_) => None,
        }
    }

    pub fn flags(&self, key: IndicatorKey) -> Option<&[bool]> {
        match self.series.get(&key)? {
            Column::Flags(v) => Some(v),
            Column::Numeric(_) => None,
        }
    }

    pub fn series(&self, key: IndicatorKey) -> Option<TimeSeries<'_, f64>> {
        self.numeric(key).map(|v| TimeSeries::new(&self.dates, v))
    }

    pub fn flag_series(&self, key: IndicatorKey) -> Option<TimeSeries<'_, bool>> {
        self.flags(key).map(|v| TimeSeries::new(&self.dates, v))
    }

    /// Latest value of a numeric series; NaN when absent or empty.
    pub fn last_value(&self, key: IndicatorKey) -> f64 {
        self.numeric(key)
            .and_then(|v| v.last().copied())
            .unwrap_or(f64::NAN)
    }

    /// Latest value of a flag series; false when absent or empty.
    pub fn last_flag(&self, key: IndicatorKey) -> bool {
        self.flags(key)
            .and_then(|v| v.last().copied())
            .unwrap_or(false)
    }

    /// Number of true bars in a flag series.
    pub fn count_true(&self, key: IndicatorKey) -> usize {
        self.flags(key)
            .map(|v| v.iter().filter(|&&f| f).count())
            .unwrap_or(0)
    }
}
