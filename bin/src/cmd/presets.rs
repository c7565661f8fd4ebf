//! Preset listing command implementation.

use super::banner;
use anyhow::Result;
use fundfolio_data::{DEFAULT_PRESET, preset, preset_names};
use fundfolio_traits::AssetCategory;

/// List the built-in portfolios, optionally with their members.
pub(crate) fn list_presets(detailed: bool) -> Result<()> {
    banner("Built-in Portfolios");

    for name in preset_names() {
        let portfolio = preset(name)?;
        let marker = if *name == DEFAULT_PRESET { " (default)" } else { "" };
        println!("{}{} - {} funds", name, marker, portfolio.len());

        if detailed {
            println!("{}", "-".repeat(60));
            for category in [AssetCategory::Equity, AssetCategory::Fixed] {
                for asset in portfolio.by_category(category) {
                    println!(
                        "  {:8} {:>6.1}%  {:7} {}",
                        asset.ticker,
                        asset.target_percent,
                        category.to_string(),
                        asset.name
                    );
                }
            }
            println!();
        }
    }

    if !detailed {
        println!("\nUse --detailed to show each preset's funds.\n");
    }

    Ok(())
}
