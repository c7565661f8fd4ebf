//! Asset and portfolio definitions.
//!
//! A [`Portfolio`] is fixed configuration: it is loaded once and never
//! mutated by the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A fund identifier, typically the exchange or registry code such as `"000368"`.
pub type Ticker = String;

/// Broad classification of a fund, used only for reporting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Equity-like funds: stock indices, commodities, gold.
    Equity,
    /// Fixed-income funds: bonds, credit.
    Fixed,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equity => write!(f, "equity"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

/// One member of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Fund identifier, also the NAV table column name.
    pub ticker: Ticker,
    /// Human-readable name.
    pub name: String,
    /// Target allocation in percent (0-100).
    pub target_percent: f64,
    /// Category tag.
    pub category: AssetCategory,
}

impl Asset {
    /// Create a new asset record.
    pub fn new(
        ticker: impl Into<Ticker>,
        name: impl Into<String>,
        target_percent: f64,
        category: AssetCategory,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            target_percent,
            category,
        }
    }

    /// Target allocation as a fraction of one.
    pub fn target_fraction(&self) -> f64 {
        self.target_percent / 100.0
    }
}

/// A named, ordered list of assets with target allocations.
///
/// Targets are expected to sum to 100. This is not enforced; use
/// [`Portfolio::target_sum`] to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Display name of the portfolio.
    pub name: String,
    /// Members in configuration order.
    pub assets: Vec<Asset>,
}

impl Portfolio {
    /// Create a portfolio from its members.
    pub fn new(name: impl Into<String>, assets: Vec<Asset>) -> Self {
        Self {
            name: name.into(),
            assets,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the portfolio has no members.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Sum of all target percentages.
    pub fn target_sum(&self) -> f64 {
        self.assets.iter().map(|a| a.target_percent).sum()
    }

    /// Tickers in configuration order.
    pub fn tickers(&self) -> Vec<Ticker> {
        self.assets.iter().map(|a| a.ticker.clone()).collect()
    }

    /// Look up a member by ticker.
    pub fn asset(&self, ticker: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.ticker == ticker)
    }

    /// Members with the given category.
    pub fn by_category(&self, category: AssetCategory) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(move |a| a.category == category)
    }

    /// Tickers of all equity-like members.
    pub fn equity_tickers(&self) -> Vec<Ticker> {
        self.by_category(AssetCategory::Equity)
            .map(|a| a.ticker.clone())
            .collect()
    }
}
