//! CSV output.

use fundfolio_traits::{Result, ValueSeries};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Turn a value series into a two-column `date`, `value` DataFrame.
pub fn series_to_dataframe(series: &ValueSeries, value_column: &str) -> Result<DataFrame> {
    let dates: Vec<String> = series.dates().iter().map(|d| d.to_string()).collect();
    let values = Column::new(value_column.into(), series.values());
    Ok(DataFrame::new(vec![Column::new("date".into(), dates), values])?)
}

/// Write a DataFrame to `path` as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
