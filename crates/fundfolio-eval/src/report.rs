//! Performance summary of a simulation.
//!
//! Returns are expressed in percent. Annualization uses calendar time between
//! the requested start and end dates (`days / 365`), not the number of rows.

use crate::drawdown::{MaxDrawdown, calculate_max_drawdown};
use crate::rebalance::SimulationResult;
use chrono::Datelike;
use fundfolio_traits::{AssetCategory, Date, NavTable, Portfolio, Result, Ticker, ValueSeries};
use serde::{Deserialize, Serialize};

/// Return of the portfolio inside one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    /// Calendar year
    pub year: i32,
    /// `(last - first) / first * 100` over that year's points
    pub return_pct: f64,
}

/// How one portfolio member did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberReport {
    /// Fund identifier
    pub ticker: Ticker,
    /// Display name
    pub name: String,
    /// Category tag
    pub category: AssetCategory,
    /// Profit of the position held inside the portfolio, rebalances included
    pub holding_return_pct: f64,
    /// Annualized `holding_return_pct`
    pub holding_annualized_pct: f64,
    /// Profit of the fund's NAV alone over the period
    pub standalone_return_pct: f64,
    /// Annualized `standalone_return_pct`
    pub standalone_annualized_pct: f64,
    /// Maximum drawdown of the NAV alone, in percent of its peak
    pub standalone_max_drawdown_pct: f64,
}

/// Summary statistics for one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Portfolio name
    pub portfolio: String,
    /// Requested start of the period
    pub start_date: Date,
    /// Requested end of the period
    pub end_date: Date,
    /// Length of the period in years
    pub years: f64,
    /// First simulated value
    pub initial_value: f64,
    /// Last simulated value
    pub final_value: f64,
    /// Total return in percent
    pub total_return_pct: f64,
    /// Compound annual return in percent
    pub annualized_return_pct: f64,
    /// Maximum drawdown of the portfolio value
    pub max_drawdown: Option<MaxDrawdown>,
    /// Maximum drawdown in percent of its peak
    pub max_drawdown_pct: f64,
    /// Number of rebalances performed
    pub n_rebalances: usize,
    /// Return per calendar year
    pub yearly_returns: Vec<YearlyReturn>,
    /// Per-member breakdown
    pub members: Vec<MemberReport>,
}

impl PerformanceReport {
    /// Summarize a finished simulation.
    ///
    /// `navs` must be the table the simulation ran on; it provides the
    /// standalone performance of each member.
    pub fn from_simulation(
        portfolio: &Portfolio,
        navs: &NavTable,
        result: &SimulationResult,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self> {
        let years = years_between(start_date, end_date);
        let values = &result.portfolio_values;

        let total_return = series_return_pct(values);
        let max_drawdown = calculate_max_drawdown(values);

        let mut members = Vec::with_capacity(portfolio.len());
        for asset in &portfolio.assets {
            let (holding_return, holding_annualized) = match result.holdings.get(&asset.ticker) {
                Some(history) => {
                    let fund_values = history.fund_values();
                    let r = slice_return_pct(&fund_values);
                    (r, annualized_return_pct(r, years))
                }
                None => (f64::NAN, f64::NAN),
            };

            let nav = navs.series(&asset.ticker)?;
            let standalone_return = series_return_pct(&nav);
            let standalone_dd = calculate_max_drawdown(&nav).map_or(f64::NAN, |dd| dd.percent());

            members.push(MemberReport {
                ticker: asset.ticker.clone(),
                name: asset.name.clone(),
                category: asset.category,
                holding_return_pct: holding_return,
                holding_annualized_pct: holding_annualized,
                standalone_return_pct: standalone_return,
                standalone_annualized_pct: annualized_return_pct(standalone_return, years),
                standalone_max_drawdown_pct: standalone_dd,
            });
        }

        Ok(Self {
            portfolio: portfolio.name.clone(),
            start_date,
            end_date,
            years,
            initial_value: values.first().map_or(f64::NAN, |(_, v)| v),
            final_value: values.last().map_or(f64::NAN, |(_, v)| v),
            total_return_pct: total_return,
            annualized_return_pct: annualized_return_pct(total_return, years),
            max_drawdown_pct: max_drawdown.map_or(f64::NAN, |dd| dd.percent()),
            max_drawdown,
            n_rebalances: result.rebalance_dates.len(),
            yearly_returns: yearly_returns(values),
            members,
        })
    }
}

/// Years between two dates, counting 365 days per year.
pub fn years_between(start: Date, end: Date) -> f64 {
    (end - start).num_days() as f64 / 365.0
}

/// Total return of a series in percent, from its first to its last value.
pub fn series_return_pct(series: &ValueSeries) -> f64 {
    slice_return_pct(series.values())
}

fn slice_return_pct(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => total_return_pct(first, last),
        _ => f64::NAN,
    }
}

/// `(end - start) / start * 100`.
pub fn total_return_pct(start_value: f64, end_value: f64) -> f64 {
    (end_value - start_value) / start_value * 100.0
}

/// Compound annual rate, in percent, that turns `total_pct` into a per-year figure.
///
/// Returns `NaN` when `years` is not positive.
pub fn annualized_return_pct(total_pct: f64, years: f64) -> f64 {
    if years <= 0.0 {
        return f64::NAN;
    }
    ((1.0 + total_pct / 100.0).powf(1.0 / years) - 1.0) * 100.0
}

/// Return per calendar year, using the first and last point inside each year.
pub fn yearly_returns(series: &ValueSeries) -> Vec<YearlyReturn> {
    let mut out: Vec<YearlyReturn> = Vec::new();
    let mut current: Option<(i32, f64, f64)> = None;

    for (date, value) in series.iter() {
        let year = date.year();
        current = match current {
            Some((y, first, _)) if y == year => Some((y, first, value)),
            Some((y, first, last)) => {
                out.push(YearlyReturn {
                    year: y,
                    return_pct: total_return_pct(first, last),
                });
                Some((year, value, value))
            }
            None => Some((year, value, value)),
        };
    }
    if let Some((year, first, last)) = current {
        out.push(YearlyReturn {
            year,
            return_pct: total_return_pct(first, last),
        });
    }
    out
}
