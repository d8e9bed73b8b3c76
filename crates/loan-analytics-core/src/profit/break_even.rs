use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanAnalyticsError;
use crate::types::{LoanRecord, Rate};
use crate::LoanAnalyticsResult;

use super::{check_alignment, selected_future_value};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the break-even discount-rate search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub loans: Vec<LoanRecord>,
    /// Predicted default probabilities, positionally aligned with `loans`.
    pub predictions: Vec<Rate>,
    /// Fixed decision cutoff; selection does not depend on the discount rate.
    pub threshold: Rate,
    pub historical_fn_rate: Rate,
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: Rate,
    /// Early-exit bound on |expected profit|, not a guarantee at the returned rate.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_recovery_rate() -> Rate {
    dec!(0.2)
}

fn default_tolerance() -> Decimal {
    dec!(0.0001)
}

fn default_max_iterations() -> u32 {
    100
}

/// Result of the break-even search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    /// Discount rate at which expected profit crosses zero, or `None` when
    /// no loans pass the threshold and there are no cash flows to price.
    pub break_even_rate: Option<Rate>,
    /// Whether the search exited early with |profit| below tolerance. When
    /// false, the rate is the final-bounds midpoint: degraded precision only.
    pub converged: bool,
    /// Bisection steps taken.
    pub iterations: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Bisect over discount rates in [0, 1] for the rate where expected profit is zero.
///
/// The selected subset and its total future value do not depend on the rate,
/// so both are computed once up front; each iteration re-prices only the
/// purchase price `total_future_value / (1 + mid)`. Expected profit is
/// monotonically decreasing in the rate (a higher discount lowers the
/// purchase price, and with recovery in [0, 1] the recovery leg cannot
/// outweigh the cheaper entry), so a positive mid-profit means the rate is
/// below break-even and the lower half is discarded.
///
/// Exhausting the iteration budget is not a failure: the final-bounds
/// midpoint is returned with `converged: false`.
pub fn calculate_break_even_discount(
    input: &BreakEvenInput,
) -> LoanAnalyticsResult<BreakEvenOutput> {
    check_alignment("break-even discount", &input.loans, &input.predictions)?;
    validate_search_parameters(input)?;

    let (num_selected, total_future_value) =
        selected_future_value(&input.loans, &input.predictions, input.threshold);

    if num_selected == 0 {
        return Ok(BreakEvenOutput {
            break_even_rate: None,
            converged: false,
            iterations: 0,
        });
    }

    // Rate-independent leg of the return.
    let expected_return_true_paid = total_future_value * (Decimal::ONE - input.historical_fn_rate);

    let mut lower_bound = Decimal::ZERO;
    let mut upper_bound = Decimal::ONE;

    for iteration in 1..=input.max_iterations {
        let mid = (lower_bound + upper_bound) / dec!(2);

        let purchase_price = total_future_value / (Decimal::ONE + mid);
        let expected_return_defaults =
            purchase_price * input.historical_fn_rate * input.recovery_rate;
        let expected_profit = expected_return_true_paid + expected_return_defaults - purchase_price;

        if expected_profit.abs() < input.tolerance {
            return Ok(BreakEvenOutput {
                break_even_rate: Some(mid),
                converged: true,
                iterations: iteration,
            });
        }

        if expected_profit > Decimal::ZERO {
            // Still profitable: break-even lies at a lower rate.
            upper_bound = mid;
        } else {
            lower_bound = mid;
        }
    }

    Ok(BreakEvenOutput {
        break_even_rate: Some((lower_bound + upper_bound) / dec!(2)),
        converged: false,
        iterations: input.max_iterations,
    })
}

fn validate_search_parameters(input: &BreakEvenInput) -> LoanAnalyticsResult<()> {
    if input.tolerance <= Decimal::ZERO {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "tolerance".into(),
            reason: "Tolerance must be positive".into(),
        });
    }
    if input.max_iterations == 0 {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "max_iterations".into(),
            reason: "At least one bisection step is required".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
