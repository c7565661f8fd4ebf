//! Built-in portfolios.

use fundfolio_traits::{Asset, AssetCategory, FundfolioError, Portfolio, Result};

/// Names of all built-in portfolios.
pub const PRESET_NAMES: &[&str] = &["lao-huang-niu", "classic-four"];

/// Default preset used when none is given.
pub const DEFAULT_PRESET: &str = "lao-huang-niu";

/// Look up a built-in portfolio by name.
pub fn preset(name: &str) -> Result<Portfolio> {
    match name {
        "lao-huang-niu" => Ok(lao_huang_niu()),
        "classic-four" => Ok(classic_four()),
        other => Err(FundfolioError::UnknownPreset(other.to_string())),
    }
}

/// Names of all built-in portfolios.
pub fn preset_names() -> &'static [&'static str] {
    PRESET_NAMES
}

/// Three equity-like funds at 20% each and five bond funds at 8% each.
pub fn lao_huang_niu() -> Portfolio {
    use AssetCategory::{Equity, Fixed};
    Portfolio::new(
        "lao-huang-niu",
        vec![
            Asset::new("000368", "汇添富沪深300安中指数A", 20.0, Equity),
            Asset::new("050025", "博时标普500", 20.0, Equity),
            Asset::new("000216", "华安黄金ETF", 20.0, Equity),
            Asset::new("400030", "东方天益", 8.0, Fixed),
            Asset::new("000914", "中加纯债", 8.0, Fixed),
            Asset::new("004388", "鹏华债券", 8.0, Fixed),
            Asset::new("000032", "易方达信用债", 8.0, Fixed),
            Asset::new("000187", "华泰博瑞", 8.0, Fixed),
        ],
    )
}

/// CSI 300, S&P 500 and gold at 20% each, one bond fund at 40%.
pub fn classic_four() -> Portfolio {
    use AssetCategory::{Equity, Fixed};
    Portfolio::new(
        "classic-four",
        vec![
            Asset::new("163407", "兴全沪深300", 20.0, Equity),
            Asset::new("050025", "博时标普500", 20.0, Equity),
            Asset::new("000216", "华安黄金ETF", 20.0, Equity),
            Asset::new("000402", "工银纯债债券A", 40.0, Fixed),
        ],
    )
}
