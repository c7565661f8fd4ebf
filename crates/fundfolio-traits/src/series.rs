//! Date-indexed value series.

use crate::{Date, FundfolioError, Result};
use serde::{Deserialize, Serialize};

/// An ordered sequence of `(date, value)` pairs.
///
/// Used both for the simulated portfolio value and for a single fund's NAV
/// history when it is fed to the drawdown calculator. Dates are expected to be
/// strictly increasing; [`ValueSeries::new`] checks this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ValueSeries {
    /// Build a series from parallel date and value vectors.
    ///
    /// Fails if the lengths differ or the dates are not strictly increasing.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(FundfolioError::InvalidData(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FundfolioError::InvalidDate(format!(
                "dates not strictly increasing at {} -> {}",
                w[0], w[1]
            )));
        }
        Ok(Self { dates, values })
    }

    /// Build a series from `(date, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Date, f64)>) -> Result<Self> {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Append a point. The caller guarantees date ordering.
    pub(crate) fn push_unchecked(&mut self, date: Date, value: f64) {
        self.dates.push(date);
        self.values.push(value);
    }

    /// Append a point after the current last date.
    pub fn push(&mut self, date: Date, value: f64) -> Result<()> {
        if let Some(&last) = self.dates.last()
            && date <= last
        {
            return Err(FundfolioError::InvalidDate(format!(
                "{date} does not follow {last}"
            )));
        }
        self.push_unchecked(date, value);
        Ok(())
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Values in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First point.
    pub fn first(&self) -> Option<(Date, f64)> {
        Some((*self.dates.first()?, *self.values.first()?))
    }

    /// Last point.
    pub fn last(&self) -> Option<(Date, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    /// Iterate over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_new_and_accessors() {
        let series = ValueSeries::new(vec![d(1), d(2), d(3)], vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first(), Some((d(1), 1.0)));
        assert_eq!(series.last(), Some((d(3), 3.0)));
        assert_eq!(series.iter().count(), 3);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(ValueSeries::new(vec![d(1)], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_unordered_dates() {
        assert!(ValueSeries::new(vec![d(2), d(1)], vec![1.0, 2.0]).is_err());
        assert!(ValueSeries::new(vec![d(1), d(1)], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_push() {
        let mut series = ValueSeries::default();
        series.push(d(1), 1.0).unwrap();
        series.push(d(2), 2.0).unwrap();
        assert!(series.push(d(2), 3.0).is_err());
        assert_eq!(series.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_empty() {
        let series = ValueSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first(), None);
    }
}
