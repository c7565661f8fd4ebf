//! Start-date sweep command implementation.

use super::{OutputFormat, banner, section};
use crate::data::{self, PortfolioArgs};
use anyhow::{Result, bail};
use fundfolio_eval::{
    RebalanceConfig, StartDateSweep, SweepConfig, SweepPoint, SweepStatistics,
    monthly_start_dates,
};
use serde::Serialize;
use std::path::PathBuf;

/// Options for a start-date sweep.
#[derive(Debug)]
pub(crate) struct SweepOptions {
    pub(crate) data_dir: PathBuf,
    pub(crate) first_start: String,
    pub(crate) last_start: String,
    pub(crate) end: String,
    pub(crate) portfolio: PortfolioArgs,
    pub(crate) rebalance_days: usize,
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct SweepOutput<'a> {
    portfolio: &'a str,
    end_date: String,
    points: &'a [SweepPoint],
    statistics: SweepStatistics,
}

/// Annualized return for every month-end start date between two bounds.
pub(crate) fn run_sweep(opts: &SweepOptions) -> Result<()> {
    let first = data::parse_date(&opts.first_start)?;
    let last = data::parse_date(&opts.last_start)?;
    let end = data::parse_date(&opts.end)?;
    if last >= end {
        bail!("last start date {last} must be before end date {end}");
    }
    let portfolio = opts.portfolio.resolve()?;

    let starts = monthly_start_dates(first, last);
    if starts.is_empty() {
        bail!("no month-end start dates between {first} and {last}");
    }

    // each window is filled on its own
    let navs = data::load_navs(&opts.data_dir, &portfolio, first, end, false)?;

    let sweep = StartDateSweep::new(SweepConfig {
        rebalance: RebalanceConfig {
            rebalance_period: opts.rebalance_days,
            record_holdings: false,
            ..Default::default()
        },
        fill_window_gaps: true,
    });
    let points = sweep.run(&portfolio, &navs, &starts, end)?;
    let statistics = SweepStatistics::from_points(&points);

    match opts.format {
        OutputFormat::Json => {
            let output = SweepOutput {
                portfolio: &portfolio.name,
                end_date: end.to_string(),
                points: &points,
                statistics,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            banner("Start Date Sweep");
            println!("Portfolio:  {}", portfolio.name);
            println!("Starts:     {} to {} ({} runs)", first, last, points.len());
            println!("End:        {}", end);
            println!();

            section("ANNUALIZED RETURN BY START DATE");
            for p in &points {
                println!("  {}  {:>8.2}%", p.start_date, p.annualized_return_pct);
            }
            println!();

            section("STATISTICS");
            println!("  Runs:        {:>10}", statistics.n);
            println!("  Mean:        {:>9.2}%", statistics.mean);
            println!("  Min:         {:>9.2}%", statistics.min);
            println!("  Max:         {:>9.2}%", statistics.max);
            println!("  Max / mean:  {:>10.4}", statistics.max_over_mean);
            println!("  Max / min:   {:>10.4}", statistics.max_over_min);
            println!("  Std dev:     {:>10.4}", statistics.std_dev);
            println!("  Variance:    {:>10.4}", statistics.variance);
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundfolio_traits::Date;
    use std::fmt::Write as _;
    use std::path::Path;

    fn write_fund(dir: &Path, ticker: &str, growth: f64) {
        let start = Date::from_ymd_opt(2020, 1, 1).unwrap();
        let mut body = String::from("date,net_value\n");
        for (i, date) in start.iter_days().take(731).enumerate() {
            writeln!(body, "{date},{:.6}", 1.0 + growth * i as f64).unwrap();
        }
        std::fs::write(dir.join(format!("{ticker}.csv")), body).unwrap();
    }

    fn options(dir: &Path, last_start: &str, end: &str) -> SweepOptions {
        let portfolio = dir.join("pair.toml");
        std::fs::write(
            &portfolio,
            "name = \"pair\"\n\n\
             [[assets]]\nticker = \"EQ\"\nname = \"Equity\"\ntarget_percent = 60\ncategory = \"equity\"\n\n\
             [[assets]]\nticker = \"FI\"\nname = \"Bonds\"\ntarget_percent = 40\ncategory = \"fixed\"\n",
        )
        .unwrap();
        SweepOptions {
            data_dir: dir.to_path_buf(),
            first_start: "2020-01-01".into(),
            last_start: last_start.into(),
            end: end.into(),
            portfolio: PortfolioArgs {
                preset: None,
                portfolio: Some(portfolio),
            },
            rebalance_days: 60,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_sweep_over_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fund(dir.path(), "EQ", 0.001);
        write_fund(dir.path(), "FI", 0.0002);
        assert!(run_sweep(&options(dir.path(), "2020-06-30", "2021-12-31")).is_ok());
    }

    #[test]
    fn test_sweep_rejects_bad_ranges() {
        let dir = tempfile::tempdir().unwrap();
        write_fund(dir.path(), "EQ", 0.001);
        write_fund(dir.path(), "FI", 0.0002);
        // last start not before end
        assert!(run_sweep(&options(dir.path(), "2021-12-31", "2021-12-31")).is_err());
        // no month end between first and last start
        assert!(run_sweep(&options(dir.path(), "2020-01-15", "2021-12-31")).is_err());
    }
}
