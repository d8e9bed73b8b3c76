mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::prep::{FicoArgs, PrepareArgs};
use commands::profit::{BreakEvenArgs, ProfitArgs, SweepArgs};

/// Loan portfolio preparation and profit-threshold analytics
#[derive(Parser)]
#[command(
    name = "lpa",
    version,
    about = "Loan portfolio profit-threshold analytics",
    long_about = "A CLI for pricing loan portfolios under a predicted-default decision \
                  threshold with decimal precision. Supports expected-profit reports, \
                  threshold sweeps with KPI selection, break-even discount search, \
                  raw-record preparation, and FICO feature construction."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Expected-profit report for one decision threshold
    Profit(ProfitArgs),
    /// Sweep candidate thresholds and optionally pick the best by KPI
    Sweep(SweepArgs),
    /// Bisect for the discount rate at which expected profit is zero
    BreakEven(BreakEvenArgs),
    /// Clean raw loan rows into typed, priceable records
    Prepare(PrepareArgs),
    /// Derive FICO midpoint/downgrade features
    Fico(FicoArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Profit(args) => commands::profit::run_profit(args),
        Commands::Sweep(args) => commands::profit::run_sweep(args),
        Commands::BreakEven(args) => commands::profit::run_break_even(args),
        Commands::Prepare(args) => commands::prep::run_prepare(args),
        Commands::Fico(args) => commands::prep::run_fico(args),
        Commands::Version => {
            println!("lpa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
