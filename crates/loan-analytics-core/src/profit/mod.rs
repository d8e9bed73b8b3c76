//! Profit-threshold optimization engine.
//!
//! Three cooperating calculations over a shared loan/prediction model:
//! 1. **Expected profit** ([`estimator`]) -- risk-adjusted valuation of the
//!    loan subset purchased at a fixed decision threshold.
//! 2. **Threshold sweep** ([`sweep`]) -- tabulate expected profit across
//!    candidate thresholds and pick the best by a KPI.
//! 3. **Break-even discount** ([`break_even`]) -- bisection search for the
//!    discount rate at which expected profit crosses zero.
//!
//! A loan is "purchased" when its predicted default probability is strictly
//! below the threshold. Predictions are positionally aligned with the loans
//! slice; the engine never re-keys by loan identifier.

pub mod break_even;
pub mod estimator;
pub mod sweep;

pub use break_even::{calculate_break_even_discount, BreakEvenInput, BreakEvenOutput};
pub use estimator::{calculate_expected_profit, ExpectedProfitInput, ThresholdResult};
pub use sweep::{best_threshold, calculate_profit_thresholds, Kpi, ThresholdRow, ThresholdSweepInput};

use rust_decimal::Decimal;

use crate::error::LoanAnalyticsError;
use crate::types::{LoanRecord, Money, Rate};
use crate::LoanAnalyticsResult;

/// Reject loan/prediction slices of differing length before any arithmetic.
pub(crate) fn check_alignment(
    context: &str,
    loans: &[LoanRecord],
    predictions: &[Rate],
) -> LoanAnalyticsResult<()> {
    if loans.len() != predictions.len() {
        return Err(LoanAnalyticsError::MisalignedInputs {
            context: context.into(),
            left: loans.len(),
            right: predictions.len(),
        });
    }
    Ok(())
}

/// Select the predicted-paid subset and total its remaining cash flow.
///
/// Returns the selected count and the sum of `installment * time_to_maturity`
/// over loans whose prediction is strictly below the threshold.
pub(crate) fn selected_future_value(
    loans: &[LoanRecord],
    predictions: &[Rate],
    threshold: Rate,
) -> (u64, Money) {
    let mut count = 0u64;
    let mut total_future_value = Decimal::ZERO;
    for (loan, prediction) in loans.iter().zip(predictions) {
        if *prediction < threshold {
            count += 1;
            total_future_value += loan.installment * loan.time_to_maturity;
        }
    }
    (count, total_future_value)
}
