//! Callback hook into the simulation loop.
//!
//! The simulator drives its own day-by-day iteration and reports progress to
//! a [`SimulationObserver`]. Observers only watch; they cannot alter holdings.

use crate::{Date, Ticker};
use serde::{Deserialize, Serialize};

/// What a rebalance did to one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceAdjustment {
    /// Fund identifier.
    pub ticker: Ticker,
    /// Fund value before the rebalance.
    pub value_before: f64,
    /// Fund value after the rebalance, the target share of the total.
    pub value_after: f64,
    /// Shares added (positive) or removed (negative).
    pub shares_delta: f64,
}

impl RebalanceAdjustment {
    /// Value moved into (positive) or out of (negative) this asset.
    pub fn value_delta(&self) -> f64 {
        self.value_after - self.value_before
    }
}

/// Receives events from the rebalancing simulator.
///
/// All methods have empty default bodies so implementors only override what
/// they need.
///
/// # Example
///
/// ```
/// use fundfolio_traits::{Date, RebalanceAdjustment, SimulationObserver};
///
/// #[derive(Default)]
/// struct CountRebalances(usize);
///
/// impl SimulationObserver for CountRebalances {
///     fn on_rebalance(&mut self, _date: Date, _total: f64, _adj: &[RebalanceAdjustment]) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimulationObserver {
    /// Called once with the start date and the initial portfolio value.
    fn on_start(&mut self, date: Date, value: f64) {
        let _ = (date, value);
    }

    /// Called for every simulated day after the first, with the pre-rebalance total.
    fn on_day(&mut self, date: Date, value: f64) {
        let _ = (date, value);
    }

    /// Called after holdings were reset to their targets.
    fn on_rebalance(&mut self, date: Date, total_value: f64, adjustments: &[RebalanceAdjustment]) {
        let _ = (date, total_value, adjustments);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_value_delta() {
        let adj = RebalanceAdjustment {
            ticker: "A".into(),
            value_before: 80.0,
            value_after: 100.0,
            shares_delta: 10.0,
        };
        assert_relative_eq!(adj.value_delta(), 20.0);
    }

    #[test]
    fn test_noop_observer_accepts_events() {
        let mut observer = NoopObserver;
        let date = Date::from_ymd_opt(2024, 1, 2).unwrap();
        observer.on_start(date, 100.0);
        observer.on_day(date, 101.0);
        observer.on_rebalance(date, 101.0, &[]);
    }
}
