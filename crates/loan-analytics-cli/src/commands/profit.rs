use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use loan_analytics_core::profit::{
    best_threshold, calculate_break_even_discount, calculate_expected_profit,
    calculate_profit_thresholds, BreakEvenInput, ExpectedProfitInput, Kpi, ThresholdSweepInput,
};

use crate::input;

/// KPI flag for threshold selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KpiArg {
    Profit,
    Roi,
}

impl From<KpiArg> for Kpi {
    fn from(arg: KpiArg) -> Self {
        match arg {
            KpiArg::Profit => Kpi::Profit,
            KpiArg::Roi => Kpi::Roi,
        }
    }
}

/// Arguments for the expected-profit report
#[derive(Args)]
pub struct ProfitArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV loan file with installment,time_to_maturity columns
    #[arg(long)]
    pub loans: Option<String>,

    /// Path to JSON array of predicted default probabilities
    #[arg(long)]
    pub predictions: Option<String>,

    /// Decision threshold: purchase loans predicted strictly below it
    #[arg(long)]
    pub threshold: Option<Decimal>,

    /// Fraction of predicted-paid loans expected to actually default
    #[arg(long, alias = "fn-rate")]
    pub historical_fn_rate: Option<Decimal>,

    /// Fraction of invested capital recovered on a default
    #[arg(long, default_value_t = dec!(0.05))]
    pub recovery_rate: Decimal,

    /// Rate for present-valuing the portfolio's future cash flows
    #[arg(long, default_value_t = dec!(0.05))]
    pub discount_rate: Decimal,
}

/// Arguments for the threshold sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV loan file with installment,time_to_maturity columns
    #[arg(long)]
    pub loans: Option<String>,

    /// Path to JSON array of predicted default probabilities
    #[arg(long)]
    pub predictions: Option<String>,

    /// Candidate thresholds, comma separated (e.g. 0.2,0.3,0.4)
    #[arg(long, value_delimiter = ',')]
    pub thresholds: Vec<Decimal>,

    /// Fraction of predicted-paid loans expected to actually default
    #[arg(long, alias = "fn-rate")]
    pub historical_fn_rate: Option<Decimal>,

    /// Fraction of invested capital recovered on a default
    #[arg(long, default_value_t = dec!(0.5))]
    pub recovery_rate: Decimal,

    /// Rate for present-valuing the portfolio's future cash flows
    #[arg(long, default_value_t = dec!(0.05))]
    pub discount_rate: Decimal,

    /// Also report the best threshold by this KPI
    #[arg(long)]
    pub kpi: Option<KpiArg>,
}

/// Arguments for the break-even discount search
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV loan file with installment,time_to_maturity columns
    #[arg(long)]
    pub loans: Option<String>,

    /// Path to JSON array of predicted default probabilities
    #[arg(long)]
    pub predictions: Option<String>,

    /// Decision threshold: purchase loans predicted strictly below it
    #[arg(long)]
    pub threshold: Option<Decimal>,

    /// Fraction of predicted-paid loans expected to actually default
    #[arg(long, alias = "fn-rate")]
    pub historical_fn_rate: Option<Decimal>,

    /// Fraction of invested capital recovered on a default
    #[arg(long, default_value_t = dec!(0.2))]
    pub recovery_rate: Decimal,

    /// Early-exit bound on |expected profit|
    #[arg(long, default_value_t = dec!(0.0001))]
    pub tolerance: Decimal,

    /// Bisection iteration budget
    #[arg(long, default_value_t = 100)]
    pub max_iterations: u32,
}

pub fn run_profit(args: ProfitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profit_input: ExpectedProfitInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ExpectedProfitInput {
            loans: read_loans(&args.loans)?,
            predictions: read_predictions(&args.predictions)?,
            threshold: args
                .threshold
                .ok_or("--threshold is required (or provide --input)")?,
            historical_fn_rate: args
                .historical_fn_rate
                .ok_or("--historical-fn-rate is required (or provide --input)")?,
            recovery_rate: args.recovery_rate,
            discount_rate: args.discount_rate,
        }
    };

    let result = calculate_expected_profit(&profit_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: ThresholdSweepInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        if args.thresholds.is_empty() {
            return Err("--thresholds is required (or provide --input)".into());
        }
        ThresholdSweepInput {
            loans: read_loans(&args.loans)?,
            predictions: read_predictions(&args.predictions)?,
            thresholds: args.thresholds.clone(),
            historical_fn_rate: args
                .historical_fn_rate
                .ok_or("--historical-fn-rate is required (or provide --input)")?,
            recovery_rate: args.recovery_rate,
            discount_rate: args.discount_rate,
        }
    };

    let rows = calculate_profit_thresholds(&sweep_input)?;

    match args.kpi {
        Some(kpi_arg) => {
            let kpi: Kpi = kpi_arg.into();
            let best = best_threshold(&rows, kpi);
            Ok(serde_json::json!({
                "rows": rows,
                "kpi": kpi.to_string(),
                "best_threshold": best,
            }))
        }
        None => Ok(serde_json::to_value(rows)?),
    }
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let break_even_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BreakEvenInput {
            loans: read_loans(&args.loans)?,
            predictions: read_predictions(&args.predictions)?,
            threshold: args
                .threshold
                .ok_or("--threshold is required (or provide --input)")?,
            historical_fn_rate: args
                .historical_fn_rate
                .ok_or("--historical-fn-rate is required (or provide --input)")?,
            recovery_rate: args.recovery_rate,
            tolerance: args.tolerance,
            max_iterations: args.max_iterations,
        }
    };

    let result = calculate_break_even_discount(&break_even_input)?;
    Ok(serde_json::to_value(result)?)
}

fn read_loans(
    path: &Option<String>,
) -> Result<Vec<loan_analytics_core::LoanRecord>, Box<dyn std::error::Error>> {
    let path = path
        .as_deref()
        .ok_or("--loans CSV file is required (or provide --input)")?;
    input::portfolio::read_loans_csv(path)
}

fn read_predictions(path: &Option<String>) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let path = path
        .as_deref()
        .ok_or("--predictions JSON file is required (or provide --input)")?;
    input::portfolio::read_predictions(path)
}
