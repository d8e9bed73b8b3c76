use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{LoanRecord, Money, Rate};
use crate::LoanAnalyticsResult;

use super::estimator::{estimate, validate_discount_rate};
use super::check_alignment;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for sweeping the expected-profit estimate over candidate thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSweepInput {
    pub loans: Vec<LoanRecord>,
    /// Predicted default probabilities, positionally aligned with `loans`.
    pub predictions: Vec<Rate>,
    /// Candidate cutoffs, evaluated in order. Duplicates are evaluated independently.
    pub thresholds: Vec<Rate>,
    pub historical_fn_rate: Rate,
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: Rate,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: Rate,
}

fn default_recovery_rate() -> Rate {
    dec!(0.5)
}

fn default_discount_rate() -> Rate {
    dec!(0.05)
}

/// One sweep row: the abbreviated profit report for a single candidate threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRow {
    pub threshold: Rate,
    pub expected_profit: Money,
    pub num_loans: u64,
    pub expected_roi: Rate,
    pub total_investment: Money,
}

/// KPI to maximize when picking the best threshold out of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kpi {
    Profit,
    Roi,
}

impl std::fmt::Display for Kpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kpi::Profit => write!(f, "profit"),
            Kpi::Roi => write!(f, "roi"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the expected-profit estimate at each candidate threshold.
///
/// Produces one row per threshold, in input order. Each row is exactly the
/// projection of an independent [`calculate_expected_profit`] call with the
/// same threshold, so the sweep has no cross-threshold state.
///
/// [`calculate_expected_profit`]: super::calculate_expected_profit
pub fn calculate_profit_thresholds(
    input: &ThresholdSweepInput,
) -> LoanAnalyticsResult<Vec<ThresholdRow>> {
    check_alignment("threshold sweep", &input.loans, &input.predictions)?;
    validate_discount_rate(input.discount_rate)?;

    let rows = input
        .thresholds
        .iter()
        .map(|&threshold| {
            let report = estimate(
                &input.loans,
                &input.predictions,
                threshold,
                input.historical_fn_rate,
                input.recovery_rate,
                input.discount_rate,
            );
            ThresholdRow {
                threshold,
                expected_profit: report.expected_profit,
                num_loans: report.num_loans_selected,
                expected_roi: report.expected_roi,
                total_investment: report.purchase_price,
            }
        })
        .collect();

    Ok(rows)
}

/// Pick the threshold whose KPI value is highest across the sweep.
///
/// Stable argmax: ties are broken by the earliest row. Returns `None` when
/// the sweep is empty or the best KPI value is not strictly positive --
/// "no threshold worth buying at" is a normal outcome, not an error.
pub fn best_threshold(rows: &[ThresholdRow], kpi: Kpi) -> Option<Rate> {
    let value = |row: &ThresholdRow| match kpi {
        Kpi::Profit => row.expected_profit,
        Kpi::Roi => row.expected_roi,
    };

    let first = rows.first()?;
    let mut best_row = first;
    let mut best_value = value(first);

    for row in &rows[1..] {
        let v = value(row);
        if v > best_value {
            best_value = v;
            best_row = row;
        }
    }

    if best_value > Decimal::ZERO {
        Some(best_row.threshold)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
