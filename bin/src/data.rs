//! Data loading utilities for the fundfolio CLI.

use anyhow::{Context, Result, bail};
use clap::Args;
use fundfolio_data::{DEFAULT_PRESET, load_portfolio, load_portfolio_navs, preset};
use fundfolio_traits::{Date, NavTable, Portfolio};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which portfolio to simulate.
#[derive(Debug, Clone, Args)]
pub(crate) struct PortfolioArgs {
    /// Built-in portfolio name (see `fundfolio presets`)
    #[arg(short, long, conflicts_with = "portfolio")]
    pub(crate) preset: Option<String>,

    /// Portfolio TOML file
    #[arg(long, value_name = "FILE")]
    pub(crate) portfolio: Option<PathBuf>,
}

impl PortfolioArgs {
    /// Resolve to a portfolio, falling back to the default preset.
    pub(crate) fn resolve(&self) -> Result<Portfolio> {
        let portfolio = match (&self.preset, &self.portfolio) {
            (_, Some(path)) => load_portfolio(path)
                .with_context(|| format!("reading portfolio {}", path.display()))?,
            (Some(name), None) => preset(name)?,
            (None, None) => preset(DEFAULT_PRESET)?,
        };
        if portfolio.is_empty() {
            bail!("portfolio '{}' has no assets", portfolio.name);
        }
        Ok(portfolio)
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<Date> {
    Ok(fundfolio_data::parse_date(date_str)?)
}

/// Parse an optional date, substituting `default` when absent.
pub(crate) fn parse_date_or(date_str: Option<&str>, default: Date) -> Result<Date> {
    date_str.map_or(Ok(default), parse_date)
}

/// Load the portfolio's NAV files for `[start, end]`.
///
/// With `fill` set, gaps are forward then backward filled.
pub(crate) fn load_navs(
    data_dir: &Path,
    portfolio: &Portfolio,
    start: Date,
    end: Date,
    fill: bool,
) -> Result<NavTable> {
    if start > end {
        bail!("start date {start} is after end date {end}");
    }
    let mut navs = load_portfolio_navs(data_dir, portfolio, start, end)
        .with_context(|| format!("loading NAV files from {}", data_dir.display()))?;
    if navs.is_empty() {
        bail!("no NAV rows between {start} and {end}");
    }

    for (ticker, count) in navs.missing_counts() {
        if count > 0 {
            warn!(%ticker, missing = count, "NAV gaps");
        }
    }
    if fill {
        navs.fill_gaps();
    }

    info!(rows = navs.len(), funds = navs.tickers().len(), "NAV table ready");
    Ok(navs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_parse_date_or_default() {
        let default = Date::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(parse_date_or(None, default).unwrap(), default);
        assert_eq!(
            parse_date_or(Some("2024-02-29"), default).unwrap(),
            Date::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_resolve_default_preset() {
        let args = PortfolioArgs {
            preset: None,
            portfolio: None,
        };
        assert_eq!(args.resolve().unwrap().name, DEFAULT_PRESET);
    }

    #[test]
    fn test_resolve_unknown_preset() {
        let args = PortfolioArgs {
            preset: Some("nope".into()),
            portfolio: None,
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_load_navs_fills_gaps() {
        use fundfolio_traits::{Asset, AssetCategory};

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.csv"), "date,net_value\n2024-01-02,1.0\n").unwrap();
        std::fs::write(
            dir.path().join("B.csv"),
            "date,net_value\n2024-01-02,2.0\n2024-01-03,2.1\n",
        )
        .unwrap();
        let portfolio = Portfolio::new(
            "pair",
            vec![
                Asset::new("A", "a", 50.0, AssetCategory::Equity),
                Asset::new("B", "b", 50.0, AssetCategory::Fixed),
            ],
        );
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let end = Date::from_ymd_opt(2024, 1, 31).unwrap();

        let navs = load_navs(dir.path(), &portfolio, start, end, true).unwrap();
        assert!(!navs.has_missing());
        assert!(load_navs(dir.path(), &portfolio, end, start, true).is_err());
    }
}
