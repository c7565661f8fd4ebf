//! Net-asset-value tables.
//!
//! A [`NavTable`] holds one row per date and one column per fund. Values are
//! per-unit NAVs; a missing observation is stored as `NaN`. The table does not
//! fill gaps on its own, that is a separate, explicit step for the caller.

use crate::{Date, FundfolioError, Result, Ticker, ValueSeries};
use chrono::Datelike;
use ndarray::{Array2, ArrayView1, Axis, s};
use polars::prelude::*;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01, for polars `Date` columns.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Name of the date column in DataFrame form.
pub const DATE_COLUMN: &str = "date";

/// Date-indexed NAV matrix, rows are dates and columns are tickers.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTable {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    values: Array2<f64>,
}

impl NavTable {
    /// Create a table from its index, column names and a rows x columns matrix.
    ///
    /// Dates must be strictly increasing and tickers unique.
    pub fn new(dates: Vec<Date>, tickers: Vec<Ticker>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != dates.len() || values.ncols() != tickers.len() {
            return Err(FundfolioError::InvalidData(format!(
                "matrix is {}x{} but index has {} dates and {} tickers",
                values.nrows(),
                values.ncols(),
                dates.len(),
                tickers.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FundfolioError::InvalidDate(format!(
                "dates not strictly increasing at {} -> {}",
                w[0], w[1]
            )));
        }
        for (i, t) in tickers.iter().enumerate() {
            if tickers[..i].contains(t) {
                return Err(FundfolioError::InvalidData(format!("duplicate ticker {t}")));
            }
        }
        Ok(Self {
            dates,
            tickers,
            values,
        })
    }

    /// Build a table from row vectors, one inner vector per date.
    pub fn from_rows(dates: Vec<Date>, tickers: Vec<Ticker>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = tickers.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(FundfolioError::InvalidData(format!(
                "row has {} values, expected {n_cols}",
                bad.len()
            )));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((dates.len(), n_cols), flat)?;
        Self::new(dates, tickers, values)
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date index.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column names.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// The underlying matrix.
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Position of a ticker's column.
    pub fn column_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// View of one ticker's NAV column.
    pub fn column(&self, ticker: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(ticker).map(|i| self.values.column(i))
    }

    /// View of one row, in column order.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    /// One ticker's NAV history as a value series.
    pub fn series(&self, ticker: &str) -> Result<ValueSeries> {
        let column = self
            .column(ticker)
            .ok_or_else(|| FundfolioError::MissingColumn(ticker.to_string()))?;
        ValueSeries::new(self.dates.clone(), column.to_vec())
    }

    /// Whether any cell is `NaN`.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Count of `NaN` cells per ticker.
    pub fn missing_counts(&self) -> Vec<(Ticker, usize)> {
        self.tickers
            .iter()
            .zip(self.values.axis_iter(Axis(1)))
            .map(|(t, col)| (t.clone(), col.iter().filter(|v| v.is_nan()).count()))
            .collect()
    }

    /// Replace each `NaN` with the last observed value above it in the same column.
    ///
    /// Leading `NaN`s stay missing.
    pub fn forward_fill(&mut self) {
        for mut col in self.values.axis_iter_mut(Axis(1)) {
            let mut last = f64::NAN;
            for v in col.iter_mut() {
                if v.is_nan() {
                    *v = last;
                } else {
                    last = *v;
                }
            }
        }
    }

    /// Replace each `NaN` with the next observed value below it in the same column.
    ///
    /// Trailing `NaN`s stay missing.
    pub fn backward_fill(&mut self) {
        for mut col in self.values.axis_iter_mut(Axis(1)) {
            let mut next = f64::NAN;
            for v in col.iter_mut().rev() {
                if v.is_nan() {
                    *v = next;
                } else {
                    next = *v;
                }
            }
        }
    }

    /// Forward fill then backward fill, so only all-missing columns keep `NaN`s.
    ///
    /// This is the preparation the simulator expects: non-trading days carry
    /// the previous NAV, and a window that opens before a fund's first
    /// observation takes its first known NAV.
    pub fn fill_gaps(&mut self) {
        self.forward_fill();
        self.backward_fill();
    }

    /// Rows with dates inside `[start, end]`, inclusive on both ends.
    pub fn slice(&self, start: Date, end: Date) -> Self {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end).max(lo);
        Self {
            dates: self.dates[lo..hi].to_vec(),
            tickers: self.tickers.clone(),
            values: self.values.slice(s![lo..hi, ..]).to_owned(),
        }
    }

    /// Convert to a DataFrame with a `date` column followed by one column per ticker.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let days: Vec<i32> = self
            .dates
            .iter()
            .map(|d| d.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS)
            .collect();
        let mut columns: Vec<Column> = Vec::with_capacity(self.tickers.len() + 1);
        columns.push(
            Series::new(DATE_COLUMN.into(), days)
                .cast(&DataType::Date)?
                .into(),
        );
        for (ticker, col) in self.tickers.iter().zip(self.values.axis_iter(Axis(1))) {
            columns.push(Series::new(ticker.as_str().into(), col.to_vec()).into());
        }
        Ok(DataFrame::new(columns)?)
    }

    /// Build a table from a DataFrame with a `date` column and numeric ticker columns.
    ///
    /// The date column may be a polars `Date` or `YYYY-MM-DD` strings. Null
    /// cells become `NaN`. Rows are taken in the frame's order.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let dates = dates_from_column(
            df.column(DATE_COLUMN)
                .map_err(|_| FundfolioError::MissingColumn(DATE_COLUMN.to_string()))?,
        )?;

        let tickers: Vec<Ticker> = df
            .get_column_names()
            .iter()
            .filter(|name| name.as_str() != DATE_COLUMN)
            .map(|name| name.to_string())
            .collect();

        let mut values = Array2::from_elem((dates.len(), tickers.len()), f64::NAN);
        for (j, ticker) in tickers.iter().enumerate() {
            let series = df
                .column(ticker)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            for (i, v) in series.f64()?.into_iter().enumerate() {
                values[[i, j]] = v.unwrap_or(f64::NAN);
            }
        }

        Self::new(dates, tickers, values)
    }
}

/// Read a polars date-like column into chrono dates.
pub fn dates_from_column(column: &Column) -> Result<Vec<Date>> {
    let series = column.as_materialized_series();
    match series.dtype() {
        DataType::Date => series
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|days| Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS))
                    .ok_or_else(|| FundfolioError::InvalidDate("null or out-of-range date".into()))
            })
            .collect(),
        DataType::String => series
            .str()?
            .into_iter()
            .map(|s: Option<&str>| {
                let s = s.ok_or_else(|| FundfolioError::InvalidDate("null date".into()))?;
                Date::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|e| FundfolioError::InvalidDate(format!("{s}: {e}")))
            })
            .collect(),
        other => Err(FundfolioError::InvalidData(format!(
            "date column has unsupported type {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn table() -> NavTable {
        NavTable::new(
            vec![d(1), d(4), d(5), d(6)],
            vec!["A".into(), "B".into()],
            array![[1.0, 2.0], [1.1, f64::NAN], [1.2, 2.2], [1.3, 2.3]],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_mismatch() {
        let result = NavTable::new(vec![d(1)], vec!["A".into()], array![[1.0, 2.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_ticker() {
        let result = NavTable::new(vec![d(1)], vec!["A".into(), "A".into()], array![[1.0, 2.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_rows() {
        let t = NavTable::from_rows(
            vec![d(1), d(2)],
            vec!["A".into()],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert!(NavTable::from_rows(vec![d(1)], vec!["A".into()], vec![vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_column_and_row() {
        let t = table();
        assert_eq!(t.column("A").unwrap().to_vec(), vec![1.0, 1.1, 1.2, 1.3]);
        assert!(t.column("C").is_none());
        assert_eq!(t.row(2).to_vec(), vec![1.2, 2.2]);
    }

    #[test]
    fn test_missing() {
        let t = table();
        assert!(t.has_missing());
        assert_eq!(
            t.missing_counts(),
            vec![("A".to_string(), 0), ("B".to_string(), 1)]
        );
    }

    fn gappy() -> NavTable {
        NavTable::new(
            vec![d(1), d(2), d(3), d(4)],
            vec!["A".into(), "B".into(), "C".into()],
            array![
                [f64::NAN, 1.0, f64::NAN],
                [2.0, f64::NAN, f64::NAN],
                [f64::NAN, f64::NAN, f64::NAN],
                [3.0, 4.0, f64::NAN]
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_forward_fill() {
        let mut t = gappy();
        t.forward_fill();
        assert!(t.values()[[0, 0]].is_nan());
        assert_eq!(t.column("A").unwrap().to_vec()[1..], [2.0, 2.0, 3.0]);
        assert_eq!(t.column("B").unwrap().to_vec(), vec![1.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_backward_fill() {
        let mut t = gappy();
        t.backward_fill();
        assert_eq!(t.column("A").unwrap().to_vec(), vec![2.0, 2.0, 3.0, 3.0]);
        assert_eq!(t.column("B").unwrap().to_vec(), vec![1.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_fill_gaps() {
        let mut t = gappy();
        t.fill_gaps();
        assert_eq!(t.column("A").unwrap().to_vec(), vec![2.0, 2.0, 2.0, 3.0]);
        assert_eq!(t.column("B").unwrap().to_vec(), vec![1.0, 1.0, 1.0, 4.0]);
        // a column with no observations stays missing
        assert!(t.column("C").unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(t.missing_counts()[..2], [("A".to_string(), 0), ("B".to_string(), 0)]);
    }

    #[test]
    fn test_slice_inclusive() {
        let t = table();
        let sliced = t.slice(d(2), d(5));
        assert_eq!(sliced.dates(), &[d(4), d(5)]);
        assert_eq!(sliced.row(1).to_vec(), vec![1.2, 2.2]);

        let empty = t.slice(d(7), d(9));
        assert!(empty.is_empty());
        assert_eq!(empty.tickers().len(), 2);
    }

    #[test]
    fn test_series() {
        let s = table().series("A").unwrap();
        assert_eq!(s.len(), 4);
        assert!(table().series("Z").is_err());
    }

    #[test]
    fn test_dataframe_conversion() {
        let t = table();
        let df = t.to_dataframe().unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(df.height(), 4);

        let back = NavTable::from_dataframe(&df).unwrap();
        assert_eq!(back.dates(), t.dates());
        assert_eq!(back.tickers(), t.tickers());
        assert!(back.values()[[1, 1]].is_nan());
        assert_eq!(back.values()[[3, 0]], 1.3);
    }

    #[test]
    fn test_from_dataframe_string_dates() {
        let df = df! {
            "date" => &["2024-03-01", "2024-03-04"],
            "A" => &[1.0, 1.5],
        }
        .unwrap();
        let t = NavTable::from_dataframe(&df).unwrap();
        assert_eq!(t.dates(), &[d(1), d(4)]);
        assert_eq!(t.column("A").unwrap().to_vec(), vec![1.0, 1.5]);
    }

    #[test]
    fn test_from_dataframe_missing_date() {
        let df = df! { "A" => &[1.0] }.unwrap();
        assert!(matches!(
            NavTable::from_dataframe(&df),
            Err(FundfolioError::MissingColumn(_))
        ));
    }
}
