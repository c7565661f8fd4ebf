#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundfolio/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

//! Core type definitions for the fundfolio portfolio simulator.
//!
//! This crate provides the data model shared by the simulator, the data
//! loaders and the CLI: assets and portfolios, NAV tables, value series,
//! and the observer hook that replaces framework-style strategy callbacks.

/// The version of the fundfolio-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod nav;
pub mod observer;
pub mod series;
pub mod types;

// Re-exports
pub use error::{FundfolioError, Result};
pub use nav::{CE_TO_UNIX_EPOCH_DAYS, DATE_COLUMN, NavTable, dates_from_column};
pub use observer::{NoopObserver, RebalanceAdjustment, SimulationObserver};
pub use series::ValueSeries;
pub use types::{Asset, AssetCategory, Date, Portfolio, Ticker};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
