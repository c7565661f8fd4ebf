#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundfolio/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fundfolio
//!
//! Fund portfolio rebalancing simulator and maximum drawdown calculator.
//!
//! fundfolio is an umbrella crate that re-exports all fundfolio sub-crates for
//! convenience. It covers loading daily NAV histories, simulating a fixed
//! target-allocation portfolio with periodic rebalancing, and summarizing the
//! result.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fundfolio::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> fundfolio::Result<()> {
//! let portfolio = fundfolio::data::preset("classic-four")?;
//! let start = fundfolio::data::parse_date("2015-01-01")?;
//! let end = fundfolio::data::parse_date("2024-12-31")?;
//!
//! let mut navs = fundfolio::data::load_portfolio_navs(Path::new("data"), &portfolio, start, end)?;
//! navs.fill_gaps();
//!
//! let result = Rebalancer::new(RebalanceConfig::default()).run(&portfolio, &navs)?;
//! let report = PerformanceReport::from_simulation(&portfolio, &navs, &result, start, end)?;
//! println!("Annualized: {:.2}%", report.annualized_return_pct);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`Portfolio`], [`NavTable`], [`ValueSeries`]) and the observer trait
//! - [`eval`] - Rebalancing simulation, drawdown, reports and start-date sweeps
//! - [`data`] - NAV CSV loading, TOML portfolios, presets and CSV export
//!
//! ## Pipeline
//!
//! 1. **Load** one CSV per fund and outer-join them on date
//! 2. **Fill** gaps forward then backward
//! 3. **Simulate** buy-and-hold with a rebalance every N rows
//! 4. **Report** total, annualized and yearly returns plus max drawdown

/// Version information for the fundfolio crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types for fundfolio.
///
/// - [`Portfolio`] and [`Asset`] - target allocation
/// - [`NavTable`] - aligned NAV matrix, one column per fund
/// - [`ValueSeries`] - dated value series
/// - [`SimulationObserver`] - hooks into a running simulation
pub mod traits {
    pub use fundfolio_traits::*;
}

// Re-export core types at top level for convenience
pub use fundfolio_traits::{
    Asset, AssetCategory, Date, FundfolioError, NavTable, Portfolio, Result, SimulationObserver,
    Ticker, ValueSeries,
};

// ============================================================================
// Evaluation
// ============================================================================

/// Simulation and evaluation.
///
/// ## Key Components
///
/// - **Rebalancer**: periodic rebalancing back to target percentages
/// - **calculate_max_drawdown**: single-pass maximum drawdown with dates
/// - **PerformanceReport**: portfolio and per-member return summary
/// - **StartDateSweep**: annualized return as a function of start date
///
/// ### Annualized return
///
/// ```text
/// years      = days(start, end) / 365
/// annualized = ((1 + total / 100) ^ (1 / years) - 1) * 100
/// ```
pub mod eval {
    pub use fundfolio_eval::*;
}

// ============================================================================
// Data
// ============================================================================

/// Data loading, portfolio configuration and export.
pub mod data {
    pub use fundfolio_data::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use fundfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eval::{
        MaxDrawdown, PerformanceReport, RebalanceConfig, Rebalancer, SimulationResult,
        StartDateSweep, SweepConfig, calculate_max_drawdown,
    };
    pub use crate::{
        Asset, AssetCategory, Date, FundfolioError, NavTable, Portfolio, Result,
        SimulationObserver, ValueSeries,
    };
}

// ============================================================================
// Tests
// ============================================================================
