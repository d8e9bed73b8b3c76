use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_analytics_core::features::{fico_features, FicoInput};
use loan_analytics_core::prep::{prepare_loans, RawLoanRecord};

use crate::input;

/// Arguments for raw-record preparation
#[derive(Args)]
pub struct PrepareArgs {
    /// Path to JSON array of raw loan rows (overrides --loans)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV file with installment,issue_d,term,int_rate,loan_status columns
    #[arg(long)]
    pub loans: Option<String>,

    /// As-of date for time-to-maturity (YYYY-MM-DD)
    #[arg(long)]
    pub investment_date: NaiveDate,
}

/// Arguments for FICO feature construction
#[derive(Args)]
pub struct FicoArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// FICO band lower bound at origination
    #[arg(long)]
    pub fico_range_low: Option<Decimal>,

    /// FICO band upper bound at origination
    #[arg(long)]
    pub fico_range_high: Option<Decimal>,

    /// FICO band lower bound at the last pull
    #[arg(long)]
    pub last_fico_range_low: Option<Decimal>,

    /// FICO band upper bound at the last pull
    #[arg(long)]
    pub last_fico_range_high: Option<Decimal>,
}

pub fn run_prepare(args: PrepareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw_loans: Vec<RawLoanRecord> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else if let Some(ref path) = args.loans {
        input::portfolio::read_raw_loans_csv(path)?
    } else {
        return Err("--loans CSV file is required (or provide --input)".into());
    };

    let prepared = prepare_loans(&raw_loans, args.investment_date)?;
    Ok(serde_json::to_value(prepared)?)
}

pub fn run_fico(args: FicoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fico_input: FicoInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FicoInput {
            fico_range_low: args
                .fico_range_low
                .ok_or("--fico-range-low is required (or provide --input)")?,
            fico_range_high: args
                .fico_range_high
                .ok_or("--fico-range-high is required (or provide --input)")?,
            last_fico_range_low: args
                .last_fico_range_low
                .ok_or("--last-fico-range-low is required (or provide --input)")?,
            last_fico_range_high: args
                .last_fico_range_high
                .ok_or("--last-fico-range-high is required (or provide --input)")?,
        }
    };

    let features = fico_features(&fico_input);
    Ok(serde_json::to_value(features)?)
}
