//! Start-date sensitivity sweep.
//!
//! Runs the same portfolio from many different start dates up to one fixed
//! end date and collects each run's annualized return. Every run is
//! independent, so they are spread across the rayon thread pool.

use crate::rebalance::{RebalanceConfig, Rebalancer};
use crate::report::{annualized_return_pct, series_return_pct, years_between};
use chrono::{Datelike, Months};
use fundfolio_traits::{Date, NavTable, Portfolio, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Simulator settings shared by every run
    pub rebalance: RebalanceConfig,
    /// Forward/backward fill each window before simulating it
    pub fill_window_gaps: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rebalance: RebalanceConfig {
                record_holdings: false,
                ..Default::default()
            },
            fill_window_gaps: true,
        }
    }
}

/// Result of one run in the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// First date of the window
    pub start_date: Date,
    /// Compound annual return of the run, in percent
    pub annualized_return_pct: f64,
}

/// Parallel start-date sweep.
#[derive(Debug, Default)]
pub struct StartDateSweep {
    config: SweepConfig,
}

impl StartDateSweep {
    /// Create a new sweep with configuration.
    pub const fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Simulate `portfolio` once per start date, each window ending at `end`.
    ///
    /// Windows without any rows are skipped. The returned points are sorted by
    /// start date regardless of the order in which runs finish.
    pub fn run(
        &self,
        portfolio: &Portfolio,
        navs: &NavTable,
        starts: &[Date],
        end: Date,
    ) -> Result<Vec<SweepPoint>> {
        let rebalancer = Rebalancer::new(self.config.rebalance.clone());

        let results: Vec<Option<SweepPoint>> = starts
            .par_iter()
            .map(|&start| -> Result<Option<SweepPoint>> {
                let mut window = navs.slice(start, end);
                if window.is_empty() {
                    warn!(%start, %end, "no NAV rows in window, skipping");
                    return Ok(None);
                }
                if self.config.fill_window_gaps {
                    window.fill_gaps();
                }
                let result = rebalancer.run(portfolio, &window)?;
                let total = series_return_pct(&result.portfolio_values);
                Ok(Some(SweepPoint {
                    start_date: start,
                    annualized_return_pct: annualized_return_pct(
                        total,
                        years_between(start, end),
                    ),
                }))
            })
            .collect::<Result<_>>()?;

        let mut points: Vec<SweepPoint> = results.into_iter().flatten().collect();
        points.sort_by_key(|p| p.start_date);
        info!(runs = points.len(), skipped = starts.len() - points.len(), "sweep finished");
        Ok(points)
    }
}

/// Month-end dates from `first` through `last`, inclusive.
///
/// The first date returned is the end of `first`'s month.
pub fn monthly_start_dates(first: Date, last: Date) -> Vec<Date> {
    let mut out = Vec::new();
    let mut month_start = first.with_day(1);
    while let Some(m) = month_start {
        let Some(month_end) = m
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
        else {
            break;
        };
        if month_end > last {
            break;
        }
        out.push(month_end);
        month_start = m.checked_add_months(Months::new(1));
    }
    out
}

/// Distribution of annualized returns across a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepStatistics {
    /// Number of runs
    pub n: usize,
    /// Mean annualized return
    pub mean: f64,
    /// Lowest annualized return
    pub min: f64,
    /// Highest annualized return
    pub max: f64,
    /// `max / mean`
    pub max_over_mean: f64,
    /// `max / min`
    pub max_over_min: f64,
    /// Sample standard deviation (N-1)
    pub std_dev: f64,
    /// Sample variance (N-1)
    pub variance: f64,
}

impl SweepStatistics {
    /// Summarize the annualized returns of `points`.
    ///
    /// Empty input gives `NaN` everywhere; a single point has `NaN` variance.
    pub fn from_points(points: &[SweepPoint]) -> Self {
        let values: Vec<f64> = points.iter().map(|p| p.annualized_return_pct).collect();
        let n = values.len();
        if n == 0 {
            return Self {
                n,
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                max_over_mean: f64::NAN,
                max_over_min: f64::NAN,
                std_dev: f64::NAN,
                variance: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let variance = if n > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            f64::NAN
        };

        Self {
            n,
            mean,
            min,
            max,
            max_over_mean: max / mean,
            max_over_min: max / min,
            std_dev: variance.sqrt(),
            variance,
        }
    }
}
