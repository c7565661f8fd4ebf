//! Portfolio simulation and evaluation for fundfolio.
//!
//! This crate provides:
//! - A periodic rebalancing simulator over a NAV table
//! - Maximum drawdown with peak and trough dates
//! - Performance reports (total, annualized and yearly returns, per-member stats)
//! - A parallel start-date sweep for sensitivity analysis
//!
//! # Example
//!
//! ```rust,ignore
//! use fundfolio_eval::{PerformanceReport, RebalanceConfig, Rebalancer};
//!
//! let rebalancer = Rebalancer::new(RebalanceConfig::default());
//! let result = rebalancer.run(&portfolio, &navs)?;
//! let report = PerformanceReport::from_simulation(&portfolio, &navs, &result, start, end)?;
//! println!("Annualized: {:.2}%", report.annualized_return_pct);
//! ```

pub mod drawdown;
pub mod rebalance;
pub mod report;
pub mod sweep;

// Re-export main types
pub use drawdown::{MaxDrawdown, calculate_max_drawdown, max_drawdown_points};
pub use rebalance::{
    Holding, HoldingHistory, RebalanceConfig, Rebalancer, SimulationResult, TracingObserver,
};
pub use report::{
    MemberReport, PerformanceReport, YearlyReturn, annualized_return_pct, series_return_pct,
    total_return_pct, years_between, yearly_returns,
};
pub use sweep::{StartDateSweep, SweepConfig, SweepPoint, SweepStatistics, monthly_start_dates};
