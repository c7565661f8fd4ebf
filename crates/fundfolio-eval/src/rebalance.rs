//! Periodic rebalancing simulator.
//!
//! Buys every fund at its target weight on the first row of the NAV table,
//! holds the shares unchanged, and every `rebalance_period` rows moves value
//! between funds so each one is back at its target share of the total.
//!
//! Numeric faults are not checked. A zero NAV yields infinite shares and a
//! missing NAV (`NaN`) poisons every later total; gaps must be filled before
//! calling [`Rebalancer::run`].

use fundfolio_traits::{
    Date, FundfolioError, NavTable, NoopObserver, Portfolio, RebalanceAdjustment, Result,
    SimulationObserver, Ticker, ValueSeries,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Rebalancing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceConfig {
    /// Rows between rebalances, counted from the first row
    pub rebalance_period: usize,
    /// Amount invested on the first row
    pub total_investment: f64,
    /// Keep the per-fund daily history in the result
    pub record_holdings: bool,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            rebalance_period: 220,
            total_investment: 100.0,
            record_holdings: true,
        }
    }
}

/// One fund's position at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Trading date
    pub date: Date,
    /// NAV per unit on that date
    pub net_value: f64,
    /// Units held after any rebalance on that date
    pub shares: f64,
    /// `shares * net_value`, or the target value on a rebalance day
    pub fund_value: f64,
}

/// Daily holding rows for a single fund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingHistory {
    rows: Vec<Holding>,
}

impl HoldingHistory {
    /// All rows in date order.
    pub fn rows(&self) -> &[Holding] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row.
    pub fn first(&self) -> Option<&Holding> {
        self.rows.first()
    }

    /// Last row.
    pub fn last(&self) -> Option<&Holding> {
        self.rows.last()
    }

    /// Share counts in date order.
    pub fn shares(&self) -> Vec<f64> {
        self.rows.iter().map(|h| h.shares).collect()
    }

    /// Fund values in date order.
    pub fn fund_values(&self) -> Vec<f64> {
        self.rows.iter().map(|h| h.fund_value).collect()
    }

    /// Convert to a DataFrame with `date`, `net_value`, `shares`, `fund_value` columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self.rows.iter().map(|h| h.date.to_string()).collect();
        let net_values: Vec<f64> = self.rows.iter().map(|h| h.net_value).collect();
        Ok(df! {
            "date" => dates,
            "net_value" => net_values,
            "shares" => self.shares(),
            "fund_value" => self.fund_values(),
        }?)
    }
}

/// Output of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Total portfolio value, one point per NAV row
    pub portfolio_values: ValueSeries,
    /// Per-fund daily holdings, empty unless `record_holdings` was set
    pub holdings: BTreeMap<Ticker, HoldingHistory>,
    /// Dates on which a rebalance happened
    pub rebalance_dates: Vec<Date>,
}

/// Rebalancing simulator.
#[derive(Debug, Default)]
pub struct Rebalancer {
    /// Configuration
    config: RebalanceConfig,
}

impl Rebalancer {
    /// Create a new simulator with configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use fundfolio_eval::{Rebalancer, RebalanceConfig};
    ///
    /// let rebalancer = Rebalancer::new(RebalanceConfig {
    ///     rebalance_period: 60,
    ///     ..Default::default()
    /// });
    /// let result = rebalancer.run(&portfolio, &nav_table)?;
    /// ```
    pub const fn new(config: RebalanceConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    /// Run the simulation over every row of `navs`.
    pub fn run(&self, portfolio: &Portfolio, navs: &NavTable) -> Result<SimulationResult> {
        self.run_with_observer(portfolio, navs, &mut NoopObserver)
    }

    /// Run the simulation and report each day to `observer`.
    ///
    /// # Errors
    ///
    /// Only structural problems are errors: an empty table or portfolio, a
    /// zero rebalance period, or a portfolio ticker with no NAV column.
    pub fn run_with_observer(
        &self,
        portfolio: &Portfolio,
        navs: &NavTable,
        observer: &mut dyn SimulationObserver,
    ) -> Result<SimulationResult> {
        let period = self.config.rebalance_period;
        if period == 0 {
            return Err(FundfolioError::InvalidConfig(
                "rebalance period must be at least one row".into(),
            ));
        }
        if portfolio.is_empty() {
            return Err(FundfolioError::InvalidConfig("portfolio has no assets".into()));
        }
        if navs.is_empty() {
            return Err(FundfolioError::InsufficientData(
                "NAV table has no rows".into(),
            ));
        }

        let columns = portfolio
            .assets
            .iter()
            .map(|a| {
                navs.column_index(&a.ticker)
                    .ok_or_else(|| FundfolioError::MissingColumn(a.ticker.clone()))
            })
            .collect::<Result<Vec<usize>>>()?;

        let target_sum = portfolio.target_sum();
        if (target_sum - 100.0).abs() > 1e-9 {
            warn!(portfolio = %portfolio.name, target_sum, "target percentages do not sum to 100");
        }

        let dates = navs.dates();
        let n_rows = dates.len();
        let start_date = dates[0];

        let first_row = navs.row(0);
        if columns.iter().any(|&c| first_row[c].is_nan()) {
            warn!(%start_date, "first NAV row has missing values, results will be NaN");
        }

        // Initial purchase
        let mut state: Vec<Holding> = portfolio
            .assets
            .iter()
            .zip(&columns)
            .map(|(asset, &c)| {
                let net_value = first_row[c];
                let fund_value = self.config.total_investment * asset.target_percent / 100.0;
                Holding {
                    date: start_date,
                    net_value,
                    shares: fund_value / net_value,
                    fund_value,
                }
            })
            .collect();

        let mut histories: Vec<HoldingHistory> = if self.config.record_holdings {
            state
                .iter()
                .map(|h| {
                    let mut rows = Vec::with_capacity(n_rows);
                    rows.push(*h);
                    HoldingHistory { rows }
                })
                .collect()
        } else {
            Vec::new()
        };

        let initial_value: f64 = state.iter().map(|h| h.fund_value).sum();
        let mut values = Vec::with_capacity(n_rows);
        values.push(initial_value);
        observer.on_start(start_date, initial_value);

        let mut rebalance_dates = Vec::new();

        for (day_counter, &date) in dates.iter().enumerate().skip(1) {
            let row = navs.row(day_counter);

            let mut portfolio_value = 0.0;
            for (holding, &c) in state.iter_mut().zip(&columns) {
                holding.date = date;
                holding.net_value = row[c];
                holding.fund_value = holding.net_value * holding.shares;
                portfolio_value += holding.fund_value;
            }
            values.push(portfolio_value);
            observer.on_day(date, portfolio_value);

            if day_counter % period == 0 {
                let adjustments: Vec<RebalanceAdjustment> = state
                    .iter_mut()
                    .zip(&portfolio.assets)
                    .map(|(holding, asset)| {
                        let target_value = portfolio_value * asset.target_percent / 100.0;
                        let value_change = target_value - holding.fund_value;
                        let shares_delta = value_change / holding.net_value;
                        let value_before = holding.fund_value;
                        holding.shares += shares_delta;
                        holding.fund_value = target_value;
                        RebalanceAdjustment {
                            ticker: asset.ticker.clone(),
                            value_before,
                            value_after: target_value,
                            shares_delta,
                        }
                    })
                    .collect();
                debug!(%date, day = day_counter, portfolio_value, "rebalanced");
                observer.on_rebalance(date, portfolio_value, &adjustments);
                rebalance_dates.push(date);
            }

            for (history, holding) in histories.iter_mut().zip(&state) {
                history.rows.push(*holding);
            }
        }

        let holdings = portfolio
            .assets
            .iter()
            .map(|a| a.ticker.clone())
            .zip(histories)
            .collect();

        info!(
            portfolio = %portfolio.name,
            rows = n_rows,
            rebalances = rebalance_dates.len(),
            final_value = values.last().copied().unwrap_or(f64::NAN),
            "simulation finished"
        );

        Ok(SimulationResult {
            portfolio_values: ValueSeries::new(dates.to_vec(), values)?,
            holdings,
            rebalance_dates,
        })
    }
}

/// Observer that logs every rebalance through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn on_start(&mut self, date: Date, value: f64) {
        info!(%date, value, "simulation started");
    }

    fn on_rebalance(&mut self, date: Date, total_value: f64, adjustments: &[RebalanceAdjustment]) {
        for adj in adjustments {
            debug!(
                %date,
                ticker = %adj.ticker,
                value_delta = adj.value_delta(),
                shares_delta = adj.shares_delta,
                "rebalance adjustment"
            );
        }
        info!(%date, total_value, "rebalance");
    }
}
