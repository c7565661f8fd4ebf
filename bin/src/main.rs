//! fundfolio CLI binary.
//!
//! Provides a command-line interface for the fundfolio rebalancing simulator.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::OutputFormat;
use cmd::backtest::BacktestOptions;
use cmd::sweep::SweepOptions;
use data::PortfolioArgs;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "fundfolio")]
#[command(about = "Fund portfolio rebalancing simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in portfolios
    Presets {
        /// Show each preset's funds and targets
        #[arg(short, long)]
        detailed: bool,
    },

    /// Simulate a portfolio with periodic rebalancing
    Backtest {
        /// Directory holding one `<ticker>.csv` per fund
        #[arg(short = 'D', long, default_value = "data")]
        data_dir: PathBuf,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        #[command(flatten)]
        portfolio: PortfolioArgs,

        /// Rows between rebalances
        #[arg(short, long, default_value = "220")]
        rebalance_days: usize,

        /// Initial investment
        #[arg(short, long, default_value = "100")]
        investment: f64,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write value and holding CSVs to this directory
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },

    /// Maximum drawdown of one value column in a CSV file
    Drawdown {
        /// CSV file with a `date` column
        file: PathBuf,

        /// Value column to analyze
        #[arg(short, long, default_value = fundfolio_data::NET_VALUE_COLUMN)]
        column: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Annualized return as a function of the start date
    Sweep {
        /// Directory holding one `<ticker>.csv` per fund
        #[arg(short = 'D', long, default_value = "data")]
        data_dir: PathBuf,

        /// Earliest start date (YYYY-MM-DD)
        #[arg(long)]
        first_start: String,

        /// Latest start date (YYYY-MM-DD)
        #[arg(long)]
        last_start: String,

        /// Common end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        #[command(flatten)]
        portfolio: PortfolioArgs,

        /// Rows between rebalances
        #[arg(short, long, default_value = "220")]
        rebalance_days: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::Presets { detailed } => {
            cmd::presets::list_presets(detailed)?;
        }
        Commands::Backtest {
            data_dir,
            start,
            end,
            portfolio,
            rebalance_days,
            investment,
            format,
            export_dir,
        } => {
            cmd::backtest::run_backtest(&BacktestOptions {
                data_dir,
                start,
                end,
                portfolio,
                rebalance_days,
                investment,
                format,
                export_dir,
                trace_rebalances: verbose,
            })?;
        }
        Commands::Drawdown {
            file,
            column,
            start,
            end,
            format,
        } => {
            cmd::drawdown::run_drawdown(&file, &column, start.as_deref(), end.as_deref(), format)?;
        }
        Commands::Sweep {
            data_dir,
            first_start,
            last_start,
            end,
            portfolio,
            rebalance_days,
            format,
        } => {
            cmd::sweep::run_sweep(&SweepOptions {
                data_dir,
                first_start,
                last_start,
                end,
                portfolio,
                rebalance_days,
                format,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_backtest_defaults() {
        let cli = Cli::try_parse_from([
            "fundfolio", "backtest", "--start", "2015-01-01", "--end", "2024-12-31",
        ])
        .unwrap();
        let Commands::Backtest {
            rebalance_days,
            investment,
            format,
            portfolio,
            ..
        } = cli.command
        else {
            panic!("expected backtest");
        };
        assert_eq!(rebalance_days, 220);
        assert_eq!(investment, 100.0);
        assert_eq!(format, OutputFormat::Text);
        assert!(portfolio.preset.is_none());
    }

    #[test]
    fn test_preset_conflicts_with_portfolio_file() {
        let parsed = Cli::try_parse_from([
            "fundfolio",
            "sweep",
            "--first-start",
            "2015-01-01",
            "--last-start",
            "2018-01-01",
            "--end",
            "2024-12-31",
            "--preset",
            "classic-four",
            "--portfolio",
            "p.toml",
        ]);
        assert!(parsed.is_err());
    }
}
