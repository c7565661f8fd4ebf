//! NAV file loading.
//!
//! Each fund lives in its own CSV file, `<data_dir>/<ticker>.csv`, with a
//! `date` column (`YYYY-MM-DD`) and a `net_value` column holding the
//! accumulated NAV per unit.

use fundfolio_traits::{
    DATE_COLUMN, Date, FundfolioError, NavTable, Portfolio, Result, Ticker, dates_from_column,
};
use ndarray::Array2;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the NAV column in a fund CSV file.
pub const NET_VALUE_COLUMN: &str = "net_value";

/// Path of a fund's CSV file inside `data_dir`.
pub fn fund_path(data_dir: &Path, ticker: &str) -> PathBuf {
    data_dir.join(format!("{ticker}.csv"))
}

/// Parse a date string in YYYY-MM-DD format.
pub fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| FundfolioError::InvalidDate(format!("Invalid date format: {e}")))
}

/// Read a fund CSV and keep the rows with dates in `[start, end]`.
///
/// Rows come back sorted by date. Empty or unparsable NAV cells become `NaN`.
pub fn load_fund_nav(path: &Path, start: Date, end: Date) -> Result<Vec<(Date, f64)>> {
    load_value_column(path, NET_VALUE_COLUMN, start, end)
}

/// Read the `date` column and one numeric column of a CSV, restricted to
/// `[start, end]` and sorted by date.
pub fn load_value_column(
    path: &Path,
    column: &str,
    start: Date,
    end: Date,
) -> Result<Vec<(Date, f64)>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let missing = |name: &str| FundfolioError::MissingColumn(format!("{name} in {}", path.display()));
    let dates = dates_from_column(df.column(DATE_COLUMN).map_err(|_| missing(DATE_COLUMN))?)?;
    let values = df
        .column(column)
        .map_err(|_| missing(column))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let mut rows: Vec<(Date, f64)> = dates
        .into_iter()
        .zip(values.f64()?.into_iter())
        .filter(|(d, _)| *d >= start && *d <= end)
        .map(|(d, v)| (d, v.unwrap_or(f64::NAN)))
        .collect();
    rows.sort_by_key(|(d, _)| *d);

    debug!(path = %path.display(), column, rows = rows.len(), "loaded value column");
    Ok(rows)
}

/// Load every member of `portfolio` and align them on the union of their dates.
///
/// Columns follow the portfolio's order. A fund without a row on some date
/// gets `NaN` there; call [`NavTable::fill_gaps`] before simulating.
pub fn load_portfolio_navs(
    data_dir: &Path,
    portfolio: &Portfolio,
    start: Date,
    end: Date,
) -> Result<NavTable> {
    let series = portfolio
        .assets
        .iter()
        .map(|a| load_fund_nav(&fund_path(data_dir, &a.ticker), start, end))
        .collect::<Result<Vec<_>>>()?;

    for (asset, rows) in portfolio.assets.iter().zip(&series) {
        if rows.is_empty() {
            warn!(ticker = %asset.ticker, %start, %end, "no NAV rows in range");
        }
    }

    align(portfolio.tickers(), &series)
}

/// Outer-join per-fund `(date, nav)` rows into one table.
pub fn align(tickers: Vec<Ticker>, series: &[Vec<(Date, f64)>]) -> Result<NavTable> {
    if tickers.len() != series.len() {
        return Err(FundfolioError::InvalidData(format!(
            "{} tickers but {} series",
            tickers.len(),
            series.len()
        )));
    }
    let dates: Vec<Date> = series
        .iter()
        .flat_map(|rows| rows.iter().map(|(d, _)| *d))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let values = build_matrix(&dates, series);
    NavTable::new(dates, tickers, values)
}

/// Place each series' values into the row of its date, `NaN` elsewhere.
fn build_matrix(dates: &[Date], series: &[Vec<(Date, f64)>]) -> Array2<f64> {
    let mut values = Array2::from_elem((dates.len(), series.len()), f64::NAN);
    for (j, rows) in series.iter().enumerate() {
        for &(date, nav) in rows {
            if let Ok(i) = dates.binary_search(&date) {
                values[[i, j]] = nav;
            }
        }
    }
    values
}
