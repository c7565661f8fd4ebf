//! Maximum drawdown.
//!
//! Single forward pass over a value series, tracking one open drawdown
//! period (a peak and the lowest point after it) and the deepest period
//! closed so far.

use fundfolio_traits::{Date, ValueSeries};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// The deepest peak-to-trough decline of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxDrawdown {
    /// Peak value minus trough value, in the series' own units.
    pub magnitude: f64,
    /// Date of the peak that started the decline.
    pub peak_date: Date,
    /// Date of the lowest point before the series recovered above the peak.
    pub trough_date: Date,
    /// Value at the peak.
    pub peak_value: f64,
    /// Value at the trough.
    pub trough_value: f64,
}

impl MaxDrawdown {
    /// Magnitude as a percentage of the peak value.
    pub fn percent(&self) -> f64 {
        self.magnitude / self.peak_value * 100.0
    }

    /// Calendar days between peak and trough.
    pub fn duration_days(&self) -> i64 {
        (self.trough_date - self.peak_date).num_days()
    }
}

#[derive(Debug, Clone, Copy)]
struct Period {
    peak_date: Date,
    peak_value: f64,
    trough_date: Date,
    trough_value: f64,
}

impl Period {
    const fn at(date: Date, value: f64) -> Self {
        Self {
            peak_date: date,
            peak_value: value,
            trough_date: date,
            trough_value: value,
        }
    }

    fn magnitude(&self) -> f64 {
        self.peak_value - self.trough_value
    }

    fn into_drawdown(self) -> MaxDrawdown {
        MaxDrawdown {
            magnitude: self.magnitude(),
            peak_date: self.peak_date,
            trough_date: self.trough_date,
            peak_value: self.peak_value,
            trough_value: self.trough_value,
        }
    }
}

/// Compute the maximum drawdown of a value series.
///
/// Returns `None` only for an empty series. For a series that never falls,
/// the magnitude is zero and both peak and trough are the first point.
///
/// When two periods have the same magnitude the earlier one is kept.
///
/// # Example
///
/// ```
/// use fundfolio_eval::calculate_max_drawdown;
/// use fundfolio_traits::{Date, ValueSeries};
///
/// let dates: Vec<Date> = (1..=3)
///     .map(|d| Date::from_ymd_opt(2024, 1, d).unwrap())
///     .collect();
/// let series = ValueSeries::new(dates, vec![100.0, 90.0, 80.0]).unwrap();
///
/// let dd = calculate_max_drawdown(&series).unwrap();
/// assert_eq!(dd.magnitude, 20.0);
/// ```
pub fn calculate_max_drawdown(series: &ValueSeries) -> Option<MaxDrawdown> {
    max_drawdown_points(series.iter())
}

/// Maximum drawdown over `(date, value)` points given in date order.
///
/// Accepts owned pairs or references, so a `&[(Date, f64)]` slice works
/// directly.
pub fn max_drawdown_points<I>(points: I) -> Option<MaxDrawdown>
where
    I: IntoIterator,
    I::Item: Borrow<(Date, f64)>,
{
    let mut points = points
        .into_iter()
        .map(|p| *<I::Item as Borrow<(Date, f64)>>::borrow(&p));
    let (first_date, first_value) = points.next()?;

    let mut best = Period::at(first_date, first_value);
    let mut current = best;

    for (date, value) in points {
        if value > current.peak_value {
            // the open period has ended
            if current.magnitude() > best.magnitude() {
                best = current;
            }
            current = Period::at(date, value);
        } else if value < current.trough_value {
            current.trough_date = date;
            current.trough_value = value;
        }
    }

    // series may end mid-decline
    if current.magnitude() > best.magnitude() {
        best = current;
    }

    Some(best.into_drawdown())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> ValueSeries {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        ValueSeries::new(dates, values.to_vec()).unwrap()
    }

    fn day(i: i64) -> Date {
        Date::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i)
    }

    #[test]
    fn test_empty_series() {
        assert!(calculate_max_drawdown(&ValueSeries::default()).is_none());
    }

    #[test]
    fn test_single_point() {
        let dd = calculate_max_drawdown(&series(&[42.0])).unwrap();
        assert_eq!(dd.magnitude, 0.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(0));
    }

    #[test]
    fn test_strictly_increasing_series() {
        let dd = calculate_max_drawdown(&series(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(dd.magnitude, 0.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(0));
        assert_eq!(dd.peak_value, 1.0);
        assert_eq!(dd.trough_value, 1.0);
    }

    #[test]
    fn test_flat_series() {
        let dd = calculate_max_drawdown(&series(&[5.0, 5.0, 5.0])).unwrap();
        assert_eq!(dd.magnitude, 0.0);
        assert_eq!(dd.peak_date, day(0));
    }

    #[test]
    fn test_trailing_decline_is_captured() {
        let dd = calculate_max_drawdown(&series(&[100.0, 90.0, 80.0])).unwrap();
        assert_relative_eq!(dd.magnitude, 20.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(2));
        assert_eq!(dd.peak_value, 100.0);
        assert_eq!(dd.trough_value, 80.0);
    }

    #[test]
    fn test_equal_drawdowns_keep_first() {
        let dd = calculate_max_drawdown(&series(&[100.0, 80.0, 120.0, 80.0, 130.0])).unwrap();
        assert_relative_eq!(dd.magnitude, 20.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(1));
    }

    #[test]
    fn test_equal_trailing_drawdown_keeps_first() {
        let dd = calculate_max_drawdown(&series(&[100.0, 80.0, 120.0, 100.0])).unwrap();
        assert_relative_eq!(dd.magnitude, 20.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(1));
    }

    #[test]
    fn test_later_deeper_drawdown_wins() {
        let dd = calculate_max_drawdown(&series(&[100.0, 95.0, 110.0, 70.0, 90.0, 120.0])).unwrap();
        assert_relative_eq!(dd.magnitude, 40.0);
        assert_eq!(dd.peak_date, day(2));
        assert_eq!(dd.trough_date, day(3));
        assert_relative_eq!(dd.percent(), 40.0 / 110.0 * 100.0);
        assert_eq!(dd.duration_days(), 1);
    }

    #[test]
    fn test_recovery_to_peak_does_not_close_period() {
        // 100 is equal to the peak, not above it, so the trough keeps extending
        let dd = calculate_max_drawdown(&series(&[100.0, 90.0, 100.0, 85.0])).unwrap();
        assert_relative_eq!(dd.magnitude, 15.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(3));
    }

    #[test]
    fn test_peak_never_after_trough() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0];
        let dd = calculate_max_drawdown(&series(&values)).unwrap();
        assert!(dd.peak_date <= dd.trough_date);
        assert!(dd.magnitude >= 0.0);
        assert_relative_eq!(dd.magnitude, 7.0);
    }

    #[test]
    fn test_points_from_slice() {
        let points: Vec<(Date, f64)> = [100.0, 80.0, 120.0, 80.0, 130.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| (day(i as i64), v))
            .collect();
        let dd = max_drawdown_points(&points).unwrap();
        assert_relative_eq!(dd.magnitude, 20.0);
        assert_eq!(dd.peak_date, day(0));
        assert_eq!(dd.trough_date, day(1));
        assert_eq!(max_drawdown_points(&points[..0]), None);
    }
}
