//! Start-date sensitivity on a synthetic two-fund portfolio.
//!
//! Runs one simulation per month-end start date and prints how the
//! annualized return spreads across them.

use fundfolio::eval::{StartDateSweep, SweepConfig, SweepStatistics, monthly_start_dates};
use fundfolio::{Asset, AssetCategory, Date, FundfolioError, NavTable, Portfolio};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> fundfolio::Result<()> {
    let portfolio = Portfolio::new(
        "sixty-forty",
        vec![
            Asset::new("EQ", "Equity fund", 60.0, AssetCategory::Equity),
            Asset::new("FI", "Bond fund", 40.0, AssetCategory::Fixed),
        ],
    );

    let ymd = |y, m, d| {
        Date::from_ymd_opt(y, m, d)
            .ok_or_else(|| FundfolioError::InvalidDate(format!("{y}-{m}-{d}")))
    };
    let first = ymd(2015, 1, 1)?;
    let end = ymd(2024, 12, 31)?;

    let dates: Vec<Date> = first.iter_days().take_while(|d| *d <= end).collect();
    let rows = (0..dates.len())
        .map(|i| {
            let t = i as f64;
            vec![(1.0 + 0.0003 * t) * (1.0 + 0.2 * (t / 300.0).sin()), 1.0 + 0.0001 * t]
        })
        .collect();
    let navs = NavTable::from_rows(dates, portfolio.tickers(), rows)?;

    let starts = monthly_start_dates(first, ymd(2019, 12, 31)?);
    let points =
        StartDateSweep::new(SweepConfig::default()).run(&portfolio, &navs, &starts, end)?;
    let stats = SweepStatistics::from_points(&points);

    for p in points.iter().step_by(6) {
        println!("{}  {:>6.2}%", p.start_date, p.annualized_return_pct);
    }
    println!();
    println!(
        "runs {}  mean {:.2}%  min {:.2}%  max {:.2}%  std {:.3}",
        stats.n, stats.mean, stats.min, stats.max, stats.std_dev
    );

    Ok(())
}
