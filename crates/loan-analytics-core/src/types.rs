use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and probabilities expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Period counts in months. May be fractional.
pub type Months = Decimal;

/// One cleaned loan row as consumed by the profit engine.
///
/// The two fields here are the only columns the engine reads; everything
/// else (issue date, FICO scores, status) lives in the preparation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Periodic payment amount per month.
    pub installment: Money,
    /// Remaining months until scheduled payoff. Possibly fractional.
    pub time_to_maturity: Months,
}
