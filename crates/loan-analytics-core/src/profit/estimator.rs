use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanAnalyticsError;
use crate::types::{LoanRecord, Money, Rate};
use crate::LoanAnalyticsResult;

use super::{check_alignment, selected_future_value};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the expected-profit estimate at a single decision threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedProfitInput {
    /// Cleaned loan rows under consideration for purchase.
    pub loans: Vec<LoanRecord>,
    /// Predicted default probabilities, positionally aligned with `loans`.
    pub predictions: Vec<Rate>,
    /// Decision cutoff: a loan is purchased when its prediction is strictly below.
    pub threshold: Rate,
    /// Fraction of predicted-paid loans expected to actually default.
    pub historical_fn_rate: Rate,
    /// Fraction of invested capital recouped on a defaulted loan.
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: Rate,
    /// Rate used to present-value the portfolio's future cash flows.
    #[serde(default = "default_discount_rate")]
    pub discount_rate: Rate,
}

fn default_recovery_rate() -> Rate {
    dec!(0.05)
}

fn default_discount_rate() -> Rate {
    dec!(0.05)
}

/// Full profit report for the loan subset purchased at one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Threshold the report was computed at.
    pub threshold: Rate,
    /// Number of loans in the input dataset.
    pub total_loans: u64,
    /// Number of loans with prediction below the threshold.
    pub num_loans_selected: u64,
    /// Selected share of the dataset.
    pub pct_loans_selected: Decimal,
    /// Expected (fractional) count of selected loans that actually pay.
    pub expected_true_paid_count: Decimal,
    /// Expected (fractional) count of selected loans that default.
    pub expected_default_count: Decimal,
    /// Full face value earned from the paying fraction of the book.
    pub expected_return_true_paid: Money,
    /// Partial recovery of invested capital on the defaulting fraction.
    pub expected_return_defaults: Money,
    pub total_expected_return: Money,
    /// Discounted price paid for the selected portfolio.
    pub purchase_price: Money,
    pub expected_profit: Money,
    pub expected_roi: Rate,
}

impl ThresholdResult {
    /// All-zero report for a threshold that selects no loans.
    fn empty(threshold: Rate) -> Self {
        ThresholdResult {
            threshold,
            total_loans: 0,
            num_loans_selected: 0,
            pct_loans_selected: Decimal::ZERO,
            expected_true_paid_count: Decimal::ZERO,
            expected_default_count: Decimal::ZERO,
            expected_return_true_paid: Decimal::ZERO,
            expected_return_defaults: Decimal::ZERO,
            total_expected_return: Decimal::ZERO,
            purchase_price: Decimal::ZERO,
            expected_profit: Decimal::ZERO,
            expected_roi: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate the profit of purchasing every loan predicted to be paid.
///
/// Loans whose predicted default probability is strictly below the threshold
/// form the purchased subset. The portfolio's summed future cash flow is
/// discounted once at the portfolio level (`total / (1 + discount_rate)`),
/// not compounded loan by loan. The historical false-negative rate splits
/// the subset into expected paying and defaulting fractions; recovery on
/// defaults applies to the purchase price, not the face value.
///
/// An empty selection yields an all-zero report with the threshold echoed,
/// never an error. Numeric oddities in the data (negative installments,
/// thresholds outside [0, 1]) are deliberately not validated and flow
/// through the arithmetic unchanged.
pub fn calculate_expected_profit(
    input: &ExpectedProfitInput,
) -> LoanAnalyticsResult<ThresholdResult> {
    check_alignment("expected profit", &input.loans, &input.predictions)?;
    validate_discount_rate(input.discount_rate)?;

    Ok(estimate(
        &input.loans,
        &input.predictions,
        input.threshold,
        input.historical_fn_rate,
        input.recovery_rate,
        input.discount_rate,
    ))
}

/// A discount rate of -100% or below would zero out the divisor.
pub(crate) fn validate_discount_rate(rate: Rate) -> LoanAnalyticsResult<()> {
    if rate <= dec!(-1) {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "discount_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    Ok(())
}

/// Core estimate over pre-validated slices. Shared with the threshold sweep.
pub(crate) fn estimate(
    loans: &[LoanRecord],
    predictions: &[Rate],
    threshold: Rate,
    historical_fn_rate: Rate,
    recovery_rate: Rate,
    discount_rate: Rate,
) -> ThresholdResult {
    let (num_selected, total_future_value) = selected_future_value(loans, predictions, threshold);

    if num_selected == 0 {
        return ThresholdResult::empty(threshold);
    }

    let purchase_price = total_future_value / (Decimal::ONE + discount_rate);

    let num_selected_dec = Decimal::from(num_selected);
    let expected_true_paid_count = num_selected_dec * (Decimal::ONE - historical_fn_rate);
    let expected_default_count = num_selected_dec * historical_fn_rate;

    let expected_return_true_paid = total_future_value * (Decimal::ONE - historical_fn_rate);
    let expected_return_defaults = purchase_price * historical_fn_rate * recovery_rate;
    let total_expected_return = expected_return_true_paid + expected_return_defaults;

    let expected_profit = total_expected_return - purchase_price;
    let expected_roi = if purchase_price > Decimal::ZERO {
        expected_profit / purchase_price
    } else {
        Decimal::ZERO
    };

    let total_loans = loans.len() as u64;

    ThresholdResult {
        threshold,
        total_loans,
        num_loans_selected: num_selected,
        pct_loans_selected: num_selected_dec / Decimal::from(total_loans),
        expected_true_paid_count,
        expected_default_count,
        expected_return_true_paid,
        expected_return_defaults,
        total_expected_return,
        purchase_price,
        expected_profit,
        expected_roi,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn loan(installment: Decimal, time_to_maturity: Decimal) -> LoanRecord {
        LoanRecord {
            installment,
            time_to_maturity,
        }
    }

    fn two_loan_input() -> ExpectedProfitInput {
        ExpectedProfitInput {
            loans: vec![loan(dec!(30), dec!(10)), loan(dec!(50), dec!(6))],
            predictions: vec![dec!(0.1), dec!(0.4)],
            threshold: dec!(0.3),
            historical_fn_rate: dec!(0.1),
            recovery_rate: dec!(0.05),
            discount_rate: dec!(0.05),
        }
    }

    #[test]
    fn test_two_loan_portfolio_end_to_end() {
        let out = calculate_expected_profit(&two_loan_input()).unwrap();

        // Only loan 0 selected (0.1 < 0.3): future value 30 * 10 = 300.
        assert_eq!(out.total_loans, 2);
        assert_eq!(out.num_loans_selected, 1);
        assert_eq!(out.pct_loans_selected, dec!(0.5));
        assert_eq!(out.expected_true_paid_count, dec!(0.9));
        assert_eq!(out.expected_default_count, dec!(0.1));
        assert_eq!(out.expected_return_true_paid, dec!(270));

        // purchase_price = 300 / 1.05 ≈ 285.714
        assert!(approx_eq(out.purchase_price, dec!(285.714286), dec!(0.000001)));
        // defaults recover 285.714 * 0.1 * 0.05 ≈ 1.4286
        assert!(approx_eq(out.expected_return_defaults, dec!(1.428571), dec!(0.000001)));
        assert!(approx_eq(out.total_expected_return, dec!(271.428571), dec!(0.000001)));
        assert!(approx_eq(out.expected_profit, dec!(-14.285714), dec!(0.000001)));
        assert!(approx_eq(out.expected_roi, dec!(-0.05), dec!(0.000001)));
    }

    #[test]
    fn test_no_selection_returns_all_zeros() {
        let mut input = two_loan_input();
        input.threshold = dec!(0.05); // nothing strictly below
        let out = calculate_expected_profit(&input).unwrap();

        assert_eq!(out.threshold, dec!(0.05));
        assert_eq!(out.total_loans, 0);
        assert_eq!(out.num_loans_selected, 0);
        assert_eq!(out.pct_loans_selected, Decimal::ZERO);
        assert_eq!(out.expected_true_paid_count, Decimal::ZERO);
        assert_eq!(out.expected_default_count, Decimal::ZERO);
        assert_eq!(out.expected_return_true_paid, Decimal::ZERO);
        assert_eq!(out.expected_return_defaults, Decimal::ZERO);
        assert_eq!(out.total_expected_return, Decimal::ZERO);
        assert_eq!(out.purchase_price, Decimal::ZERO);
        assert_eq!(out.expected_profit, Decimal::ZERO);
        assert_eq!(out.expected_roi, Decimal::ZERO);
    }

    #[test]
    fn test_prediction_equal_to_threshold_not_purchased() {
        let mut input = two_loan_input();
        input.predictions = vec![dec!(0.3), dec!(0.3)];
        let out = calculate_expected_profit(&input).unwrap();
        assert_eq!(out.num_loans_selected, 0);
    }

    #[test]
    fn test_empty_dataset_is_degenerate_not_an_error() {
        let input = ExpectedProfitInput {
            loans: vec![],
            predictions: vec![],
            threshold: dec!(0.5),
            historical_fn_rate: dec!(0.1),
            recovery_rate: dec!(0.05),
            discount_rate: dec!(0.05),
        };
        let out = calculate_expected_profit(&input).unwrap();
        assert_eq!(out.num_loans_selected, 0);
        assert_eq!(out.expected_profit, Decimal::ZERO);
    }

    #[test]
    fn test_expected_counts_conserve_selection() {
        let mut input = two_loan_input();
        input.threshold = dec!(0.5); // both selected
        input.historical_fn_rate = dec!(0.37);
        let out = calculate_expected_profit(&input).unwrap();
        assert_eq!(
            out.expected_true_paid_count + out.expected_default_count,
            Decimal::from(out.num_loans_selected)
        );
    }

    #[test]
    fn test_selected_never_exceeds_total() {
        let mut input = two_loan_input();
        input.threshold = dec!(1.0);
        let out = calculate_expected_profit(&input).unwrap();
        assert!(out.num_loans_selected <= out.total_loans);
        assert_eq!(out.num_loans_selected, 2);
    }

    #[test]
    fn test_roi_is_zero_when_purchase_price_is_zero() {
        let input = ExpectedProfitInput {
            loans: vec![loan(dec!(0), dec!(12))],
            predictions: vec![dec!(0.1)],
            threshold: dec!(0.3),
            historical_fn_rate: dec!(0.1),
            recovery_rate: dec!(0.05),
            discount_rate: dec!(0.05),
        };
        let out = calculate_expected_profit(&input).unwrap();
        assert_eq!(out.num_loans_selected, 1);
        assert_eq!(out.purchase_price, Decimal::ZERO);
        assert_eq!(out.expected_roi, Decimal::ZERO);
    }

    #[test]
    fn test_zero_discount_rate_pays_face_value() {
        let mut input = two_loan_input();
        input.discount_rate = Decimal::ZERO;
        let out = calculate_expected_profit(&input).unwrap();
        assert_eq!(out.purchase_price, dec!(300));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let input = two_loan_input();
        let first = calculate_expected_profit(&input).unwrap();
        let second = calculate_expected_profit(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reject_misaligned_predictions() {
        let mut input = two_loan_input();
        input.predictions.pop();
        assert!(calculate_expected_profit(&input).is_err());
    }

    #[test]
    fn test_reject_discount_rate_at_minus_one() {
        let mut input = two_loan_input();
        input.discount_rate = dec!(-1);
        assert!(calculate_expected_profit(&input).is_err());
    }

    #[test]
    fn test_serde_defaults_for_rates() {
        let json = r#"{
            "loans": [{"installment": "30", "time_to_maturity": "10"}],
            "predictions": ["0.1"],
            "threshold": "0.3",
            "historical_fn_rate": "0.1"
        }"#;
        let input: ExpectedProfitInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.recovery_rate, dec!(0.05));
        assert_eq!(input.discount_rate, dec!(0.05));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let out = calculate_expected_profit(&two_loan_input()).unwrap();
        let json = serde_json::to_string(&out).unwrap();
        let back: ThresholdResult = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }
}
