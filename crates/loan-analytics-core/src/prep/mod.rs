//! Raw-record preparation: string-field cleaning and label derivation.
//!
//! The profit engine consumes typed [`LoanRecord`]s; this module turns the
//! raw string columns of a LendingClub-style export into those records.
//! Input collections are read-only and a new owned collection comes back,
//! never an in-place mutation of the caller's data.

pub mod dates;
pub mod fields;
pub mod targets;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LoanAnalyticsError;
use crate::types::{LoanRecord, Money, Months, Rate};
use crate::LoanAnalyticsResult;

use targets::{derive_targets, TargetLabels};

/// One row as it arrives from the raw export, string fields untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLoanRecord {
    /// Periodic payment amount per month.
    pub installment: Money,
    /// Issue month, e.g. `Dec-2015` or `2015-12-01`.
    pub issue_d: String,
    /// Term string, e.g. `36 months`.
    pub term: String,
    /// Nominal interest rate, e.g. `13.49%`.
    pub int_rate: String,
    /// Categorical status, e.g. `Fully Paid`, `Current`, `Charged Off`.
    pub loan_status: String,
}

/// A cleaned row: parsed fields plus the derived maturity and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedLoan {
    pub installment: Money,
    pub issue_date: NaiveDate,
    pub term_months: u32,
    pub interest_rate: Rate,
    pub loan_end_date: NaiveDate,
    /// Months from the investment date to scheduled payoff. Negative for
    /// loans already matured; callers filter before pricing.
    pub time_to_maturity: Months,
    pub labels: TargetLabels,
}

impl PreparedLoan {
    /// Project down to the two columns the profit engine reads.
    pub fn to_loan_record(&self) -> LoanRecord {
        LoanRecord {
            installment: self.installment,
            time_to_maturity: self.time_to_maturity,
        }
    }
}

/// Clean a single raw row against an as-of investment date.
///
/// The issue date accepts the export's `Mon-YYYY` form first and falls back
/// to ISO `YYYY-MM-DD`; anything else is a hard error here, unlike the
/// engine's silent handling of numeric oddities, because an unparseable
/// date leaves no defensible maturity to price.
pub fn prepare_loan(
    raw: &RawLoanRecord,
    investment_date: NaiveDate,
) -> LoanAnalyticsResult<PreparedLoan> {
    let issue_date = dates::parse_month_date(&raw.issue_d)
        .or_else(|| dates::parse_year_month_date(&raw.issue_d))
        .ok_or_else(|| LoanAnalyticsError::DateError(format!(
            "Unparseable issue date '{}'",
            raw.issue_d
        )))?;

    let term_months = fields::parse_term(&raw.term)?;
    let interest_rate = fields::parse_percentage(&raw.int_rate)?;
    let loan_end_date = dates::loan_end_date(issue_date, term_months)?;
    let time_to_maturity = dates::time_to_maturity(loan_end_date, investment_date);

    Ok(PreparedLoan {
        installment: raw.installment,
        issue_date,
        term_months,
        interest_rate,
        loan_end_date,
        time_to_maturity,
        labels: derive_targets(&raw.loan_status),
    })
}

/// Clean a batch of raw rows, preserving order. Fails on the first bad row.
pub fn prepare_loans(
    raws: &[RawLoanRecord],
    investment_date: NaiveDate,
) -> LoanAnalyticsResult<Vec<PreparedLoan>> {
    raws.iter()
        .map(|raw| prepare_loan(raw, investment_date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn raw() -> RawLoanRecord {
        RawLoanRecord {
            installment: dec!(331.67),
            issue_d: "Dec-2015".into(),
            term: "36 months".into(),
            int_rate: "13.49%".into(),
            loan_status: "Current".into(),
        }
    }

    fn as_of(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prepare_loan_cleans_every_field() {
        let prepared = prepare_loan(&raw(), as_of(2017, 12, 1)).unwrap();

        assert_eq!(prepared.installment, dec!(331.67));
        assert_eq!(prepared.issue_date, as_of(2015, 12, 1));
        assert_eq!(prepared.term_months, 36);
        assert_eq!(prepared.interest_rate, dec!(0.1349));
        assert_eq!(prepared.loan_end_date, as_of(2018, 12, 1));
        // 365 days remaining over 30-day months.
        assert_eq!(prepared.time_to_maturity, Decimal::from(365) / dec!(30));
        assert_eq!(prepared.labels.active_loan, 1);
        assert_eq!(prepared.labels.default, 1);
    }

    #[test]
    fn test_prepare_loan_accepts_iso_issue_date() {
        let mut record = raw();
        record.issue_d = "2015-12-01".into();
        let prepared = prepare_loan(&record, as_of(2016, 1, 1)).unwrap();
        assert_eq!(prepared.issue_date, as_of(2015, 12, 1));
    }

    #[test]
    fn test_prepare_loan_rejects_bad_issue_date() {
        let mut record = raw();
        record.issue_d = "soon".into();
        assert!(prepare_loan(&record, as_of(2016, 1, 1)).is_err());
    }

    #[test]
    fn test_prepare_loan_rejects_bad_term() {
        let mut record = raw();
        record.term = "a while".into();
        assert!(prepare_loan(&record, as_of(2016, 1, 1)).is_err());
    }

    #[test]
    fn test_prepared_loan_projects_to_engine_record() {
        let prepared = prepare_loan(&raw(), as_of(2017, 12, 1)).unwrap();
        let record = prepared.to_loan_record();
        assert_eq!(record.installment, prepared.installment);
        assert_eq!(record.time_to_maturity, prepared.time_to_maturity);
    }

    #[test]
    fn test_prepare_loans_preserves_order_and_length() {
        let mut second = raw();
        second.loan_status = "Fully Paid".into();
        let batch = vec![raw(), second];

        let prepared = prepare_loans(&batch, as_of(2017, 12, 1)).unwrap();
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].labels.active_loan, 1);
        assert_eq!(prepared[1].labels.active_loan, 0);
    }

    #[test]
    fn test_prepare_loans_fails_on_first_bad_row() {
        let mut bad = raw();
        bad.int_rate = "n/a".into();
        assert!(prepare_loans(&[raw(), bad], as_of(2017, 12, 1)).is_err());
    }
}
