//! Portfolio configuration files.
//!
//! A portfolio is described in TOML:
//!
//! ```toml
//! name = "Balanced"
//!
//! [[assets]]
//! ticker = "050025"
//! name = "S&P 500 index fund"
//! target_percent = 60
//! category = "equity"
//!
//! [[assets]]
//! ticker = "000402"
//! name = "Pure bond fund"
//! target_percent = 40
//! category = "fixed"
//! ```

use fundfolio_traits::{Portfolio, Result};
use std::path::Path;
use tracing::{info, warn};

/// Parse a portfolio from TOML text.
pub fn parse_portfolio(text: &str) -> Result<Portfolio> {
    let portfolio: Portfolio = toml::from_str(text)?;
    let sum = portfolio.target_sum();
    if (sum - 100.0).abs() > 1e-9 {
        warn!(portfolio = %portfolio.name, target_sum = sum, "target percentages do not sum to 100");
    }
    Ok(portfolio)
}

/// Read and parse a portfolio TOML file.
pub fn load_portfolio(path: &Path) -> Result<Portfolio> {
    let text = std::fs::read_to_string(path)?;
    let portfolio = parse_portfolio(&text)?;
    info!(path = %path.display(), assets = portfolio.len(), "loaded portfolio");
    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundfolio_traits::{AssetCategory, FundfolioError};

    const SAMPLE: &str = r#"
name = "Balanced"

[[assets]]
ticker = "050025"
name = "S&P 500 index fund"
target_percent = 60
category = "equity"

[[assets]]
ticker = "000402"
name = "Pure bond fund"
target_percent = 40.0
category = "fixed"
"#;

    #[test]
    fn test_parse_portfolio() {
        let portfolio = parse_portfolio(SAMPLE).unwrap();
        assert_eq!(portfolio.name, "Balanced");
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.assets[0].ticker, "050025");
        assert_eq!(portfolio.assets[1].category, AssetCategory::Fixed);
        assert_relative_eq!(portfolio.target_sum(), 100.0);
    }

    #[test]
    fn test_parse_portfolio_bad_category() {
        let text = SAMPLE.replace("\"fixed\"", "\"crypto\"");
        assert!(matches!(parse_portfolio(&text), Err(FundfolioError::Toml(_))));
    }

    #[test]
    fn test_load_portfolio_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let portfolio = load_portfolio(&path).unwrap();
        assert_eq!(portfolio.tickers(), vec!["050025", "000402"]);
    }

    #[test]
    fn test_load_portfolio_missing_file() {
        let err = load_portfolio(Path::new("/nonexistent/portfolio.toml"));
        assert!(matches!(err, Err(FundfolioError::Io(_))));
    }
}
