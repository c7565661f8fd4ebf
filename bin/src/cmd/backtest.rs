//! Backtest command implementation.

use super::{OutputFormat, banner, section};
use crate::data::{self, PortfolioArgs};
use anyhow::{Context, Result};
use fundfolio_data::{series_to_dataframe, write_csv};
use fundfolio_eval::{
    PerformanceReport, RebalanceConfig, Rebalancer, SimulationResult, TracingObserver,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for one backtest run.
#[derive(Debug)]
pub(crate) struct BacktestOptions {
    pub(crate) data_dir: PathBuf,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) portfolio: PortfolioArgs,
    pub(crate) rebalance_days: usize,
    pub(crate) investment: f64,
    pub(crate) format: OutputFormat,
    pub(crate) export_dir: Option<PathBuf>,
    /// Log every rebalance adjustment
    pub(crate) trace_rebalances: bool,
}

/// Simulate a portfolio over `[start, end]` and print its performance.
pub(crate) fn run_backtest(opts: &BacktestOptions) -> Result<()> {
    let start = data::parse_date(&opts.start)?;
    let end = data::parse_date(&opts.end)?;
    let portfolio = opts.portfolio.resolve()?;

    let navs = data::load_navs(&opts.data_dir, &portfolio, start, end, true)?;

    let rebalancer = Rebalancer::new(RebalanceConfig {
        rebalance_period: opts.rebalance_days,
        total_investment: opts.investment,
        record_holdings: true,
    });
    let result = if opts.trace_rebalances {
        rebalancer.run_with_observer(&portfolio, &navs, &mut TracingObserver)?
    } else {
        rebalancer.run(&portfolio, &navs)?
    };
    let report = PerformanceReport::from_simulation(&portfolio, &navs, &result, start, end)?;

    if let Some(dir) = &opts.export_dir {
        export(dir, &result)?;
    }

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => print_report(&report, opts),
    }

    Ok(())
}

fn print_report(report: &PerformanceReport, opts: &BacktestOptions) {
    banner("Rebalancing Backtest");

    println!("Portfolio:  {}", report.portfolio);
    println!(
        "Period:     {} to {} ({:.2} years)",
        report.start_date, report.end_date, report.years
    );
    println!("Rebalance:  every {} rows", opts.rebalance_days);
    println!("Investment: {:.2}", opts.investment);
    println!();

    section("PERFORMANCE");
    println!("  Initial value:      {:>10.2}", report.initial_value);
    println!("  Final value:        {:>10.2}", report.final_value);
    println!("  Total return:       {:>9.2}%", report.total_return_pct);
    println!("  Annualized return:  {:>9.2}%", report.annualized_return_pct);
    println!("  Rebalances:         {:>10}", report.n_rebalances);
    if let Some(dd) = &report.max_drawdown {
        println!("  Max drawdown:       {:>9.2}%", report.max_drawdown_pct);
        println!(
            "    {} ({:.2}) -> {} ({:.2}), {} days",
            dd.peak_date,
            dd.peak_value,
            dd.trough_date,
            dd.trough_value,
            dd.duration_days()
        );
    }
    println!();

    if !report.yearly_returns.is_empty() {
        section("YEARLY RETURNS");
        for yr in &report.yearly_returns {
            println!("  {}:  {:>8.2}%", yr.year, yr.return_pct);
        }
        println!();
    }

    section("MEMBERS");
    println!(
        "  {:8} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "Ticker", "Held %", "Held ann", "Fund %", "Fund ann", "Fund DD"
    );
    println!("  {}", "-".repeat(62));
    for m in &report.members {
        println!(
            "  {:8} {:>9.2}% {:>9.2}% {:>9.2}% {:>9.2}% {:>7.2}%  {}",
            m.ticker,
            m.holding_return_pct,
            m.holding_annualized_pct,
            m.standalone_return_pct,
            m.standalone_annualized_pct,
            m.standalone_max_drawdown_pct,
            m.name
        );
    }
    println!();
}

/// Write the portfolio value series and one holdings file per fund.
fn export(dir: &Path, result: &SimulationResult) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut values = series_to_dataframe(&result.portfolio_values, "portfolio_value")?;
    write_csv(&mut values, &dir.join("portfolio_value.csv"))?;

    for (ticker, history) in &result.holdings {
        let mut df = history.to_dataframe()?;
        write_csv(&mut df, &dir.join(format!("holdings_{ticker}.csv")))?;
    }

    info!(dir = %dir.display(), files = result.holdings.len() + 1, "exported simulation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundfolio_traits::{Asset, AssetCategory, Date, NavTable, Portfolio};

    #[test]
    fn test_export_writes_all_files() {
        let portfolio = Portfolio::new(
            "pair",
            vec![
                Asset::new("A", "a", 50.0, AssetCategory::Equity),
                Asset::new("B", "b", 50.0, AssetCategory::Fixed),
            ],
        );
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<Date> = start.iter_days().take(4).collect();
        let navs = NavTable::from_rows(
            dates,
            portfolio.tickers(),
            vec![vec![1.0, 1.0], vec![1.1, 0.9], vec![1.2, 0.8], vec![1.3, 0.7]],
        )
        .unwrap();
        let result = Rebalancer::default().run(&portfolio, &navs).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        export(&out, &result).unwrap();

        assert!(out.join("portfolio_value.csv").exists());
        assert!(out.join("holdings_A.csv").exists());
        assert!(out.join("holdings_B.csv").exists());
    }

    #[test]
    fn test_backtest_with_traced_rebalances() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        std::fs::write(
            data_dir.join("A.csv"),
            "date,net_value\n2024-01-02,1.0\n2024-01-03,1.2\n2024-01-04,1.5\n",
        )
        .unwrap();
        std::fs::write(
            data_dir.join("B.csv"),
            "date,net_value\n2024-01-02,1.0\n2024-01-04,0.8\n",
        )
        .unwrap();
        let portfolio = dir.path().join("pair.toml");
        std::fs::write(
            &portfolio,
            "name = \"pair\"\n\n\
             [[assets]]\nticker = \"A\"\nname = \"a\"\ntarget_percent = 50\ncategory = \"equity\"\n\n\
             [[assets]]\nticker = \"B\"\nname = \"b\"\ntarget_percent = 50\ncategory = \"fixed\"\n",
        )
        .unwrap();
        let export_dir = dir.path().join("out");

        let opts = BacktestOptions {
            data_dir,
            start: "2024-01-01".into(),
            end: "2024-01-31".into(),
            portfolio: PortfolioArgs {
                preset: None,
                portfolio: Some(portfolio),
            },
            rebalance_days: 2,
            investment: 100.0,
            format: OutputFormat::Json,
            export_dir: Some(export_dir.clone()),
            trace_rebalances: true,
        };
        run_backtest(&opts).unwrap();
        assert!(export_dir.join("holdings_B.csv").exists());
    }
}
