//! Rebalancing on synthetic NAV paths.
//!
//! This example demonstrates:
//! - Building a NAV table for a stock-like, a gold-like and a bond-like fund
//! - Running the simulator with several rebalance periods
//! - Hooking into the run with a custom `SimulationObserver`
//! - Summarizing each run with `PerformanceReport`

use fundfolio::eval::{PerformanceReport, RebalanceConfig, Rebalancer};
use fundfolio::traits::RebalanceAdjustment;
use fundfolio::{Asset, AssetCategory, Date, NavTable, Portfolio, SimulationObserver};

/// Trading days simulated.
const DAYS: usize = 1500;

/// Rebalance periods to compare.
const PERIODS: &[usize] = &[20, 60, 220, 1000];

/// Records the largest single trade of each rebalance.
#[derive(Default)]
struct TradeLog {
    largest: Vec<(Date, f64)>,
}

impl SimulationObserver for TradeLog {
    fn on_rebalance(&mut self, date: Date, _total_value: f64, adjustments: &[RebalanceAdjustment]) {
        let largest = adjustments
            .iter()
            .map(|a| a.value_delta().abs())
            .fold(0.0, f64::max);
        self.largest.push((date, largest));
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> fundfolio::Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let portfolio = Portfolio::new(
        "three-fund",
        vec![
            Asset::new("STOCK", "Equity index fund", 40.0, AssetCategory::Equity),
            Asset::new("GOLD", "Gold fund", 20.0, AssetCategory::Equity),
            Asset::new("BOND", "Bond fund", 40.0, AssetCategory::Fixed),
        ],
    );
    let navs = synthetic_navs(&portfolio)?;
    let start = navs.dates()[0];
    let end = navs.dates()[DAYS - 1];

    println!("Portfolio: {} ({} to {})\n", portfolio.name, start, end);
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>6}",
        "Period", "Total %", "Annual %", "Max DD %", "Trades"
    );
    println!("{}", "-".repeat(54));

    for &period in PERIODS {
        let rebalancer = Rebalancer::new(RebalanceConfig {
            rebalance_period: period,
            ..Default::default()
        });
        let mut log = TradeLog::default();
        let result = rebalancer.run_with_observer(&portfolio, &navs, &mut log)?;
        let report = PerformanceReport::from_simulation(&portfolio, &navs, &result, start, end)?;

        println!(
            "{:>8} {:>12.2} {:>12.2} {:>12.2} {:>6}",
            period,
            report.total_return_pct,
            report.annualized_return_pct,
            report.max_drawdown_pct,
            log.largest.len()
        );
        let largest = log.largest.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((date, size)) = largest {
            println!("{:>8} largest trade {size:.2} on {date}", "");
        }
    }

    Ok(())
}

/// Deterministic NAV paths: a trending, cyclical equity fund, a slower
/// gold fund and a smooth bond fund.
fn synthetic_navs(portfolio: &Portfolio) -> fundfolio::Result<NavTable> {
    let start = Date::from_ymd_opt(2018, 1, 2)
        .ok_or_else(|| fundfolio::FundfolioError::InvalidDate("2018-01-02".into()))?;
    let dates: Vec<Date> = start.iter_days().take(DAYS).collect();
    let rows = (0..DAYS)
        .map(|i| {
            let t = i as f64;
            vec![
                (1.0 + 0.0004 * t) * (1.0 + 0.25 * (t / 180.0).sin()),
                1.0 + 0.0002 * t + 0.08 * (t / 400.0).cos() - 0.08,
                1.0 + 0.00012 * t,
            ]
        })
        .collect();
    NavTable::from_rows(dates, portfolio.tickers(), rows)
}
