//! Drawdown command implementation.

use super::{OutputFormat, banner};
use crate::data;
use anyhow::{Result, bail};
use fundfolio_data::load_value_column;
use fundfolio_eval::calculate_max_drawdown;
use fundfolio_traits::{Date, ValueSeries};
use std::path::Path;

/// Print the maximum drawdown of one column of a CSV file.
pub(crate) fn run_drawdown(
    file: &Path,
    column: &str,
    start: Option<&str>,
    end: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let start = data::parse_date_or(start, Date::MIN)?;
    let end = data::parse_date_or(end, Date::MAX)?;

    let rows = load_value_column(file, column, start, end)?;
    if rows.is_empty() {
        bail!("no rows in {} for the requested range", file.display());
    }
    let series = ValueSeries::from_pairs(rows)?;

    let Some(dd) = calculate_max_drawdown(&series) else {
        bail!("empty series");
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&dd)
                .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            banner("Maximum Drawdown");
            println!("File:       {}", file.display());
            println!("Column:     {}", column);
            println!("Rows:       {}", series.len());
            println!();
            println!("Magnitude:  {:.4} ({:.2}%)", dd.magnitude, dd.percent());
            println!("Peak:       {}  {:.4}", dd.peak_date, dd.peak_value);
            println!("Trough:     {}  {:.4}", dd.trough_date, dd.trough_value);
            println!("Duration:   {} days", dd.duration_days());
            println!();
        }
    }

    Ok(())
}
