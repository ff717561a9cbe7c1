//! TimeSeries — a borrowed (date, value) view over one column of a bundle.

use chrono::NaiveDate;

/// Values paired with the shared date axis they were computed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeries<'a, T> {
    dates: &'a [NaiveDate],
    values: &'a [T],
}

impl<'a, T: Copy> TimeSeries<'a, T> {
    /// Both slices must have the same length.
    pub(crate) fn new(dates: &'a [NaiveDate], values: &'a [T]) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    pub fn values(&self) -> &'a [T] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(NaiveDate, T)> {
        Some((*self.dates.get(i)?, *self.values.get(i)?))
    }

    pub fn last(&self) -> Option<(NaiveDate, T)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    /// Value at a given date, if the date is on the axis.
    pub fn at(&self, date: NaiveDate) -> Option<T> {
        let i = self.dates.binary_search(&date).ok()?;
        self.values.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, T)> + 'a {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
