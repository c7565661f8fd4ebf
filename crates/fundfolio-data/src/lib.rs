//! Data access for fundfolio.
//!
//! - [`loader`] reads per-fund NAV CSV files and aligns them into a [`NavTable`]
//! - [`config`] parses portfolio definitions from TOML
//! - [`presets`] holds the built-in portfolios
//! - [`export`] writes simulation output back to CSV
//!
//! [`NavTable`]: fundfolio_traits::NavTable

pub mod config;
pub mod export;
pub mod loader;
pub mod presets;

pub use config::{load_portfolio, parse_portfolio};
pub use export::{series_to_dataframe, write_csv};
pub use loader::{
    NET_VALUE_COLUMN, align, fund_path, load_fund_nav, load_portfolio_navs, load_value_column,
    parse_date,
};
pub use presets::{DEFAULT_PRESET, PRESET_NAMES, preset, preset_names};
