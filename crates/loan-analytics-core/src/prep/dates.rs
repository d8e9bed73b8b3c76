use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LoanAnalyticsError;
use crate::types::Months;
use crate::LoanAnalyticsResult;

/// Parse an ISO-style date string such as `2005-01-23`.
///
/// Unparseable input coerces to `None` rather than failing, so a column of
/// mixed-quality dates can be swept without aborting the whole batch.
pub fn parse_year_month_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse a month-year string such as `Jul-2005`, pinned to the first of the month.
pub fn parse_month_date(raw: &str) -> Option<NaiveDate> {
    let pinned = format!("01-{}", raw.trim());
    NaiveDate::parse_from_str(&pinned, "%d-%b-%Y").ok()
}

/// Scheduled payoff date: issue date plus the term in calendar months.
pub fn loan_end_date(issue_date: NaiveDate, term_months: u32) -> LoanAnalyticsResult<NaiveDate> {
    issue_date
        .checked_add_months(chrono::Months::new(term_months))
        .ok_or_else(|| {
            LoanAnalyticsError::DateError(format!(
                "Adding {term_months} months to {issue_date} overflows the calendar"
            ))
        })
}

/// Months remaining between an as-of investment date and the maturity date.
///
/// Day count over a flat 30-day month, so the result is fractional and goes
/// negative for loans already past maturity.
pub fn time_to_maturity(maturity_date: NaiveDate, investment_date: NaiveDate) -> Months {
    let days = (maturity_date - investment_date).num_days();
    Decimal::from(days) / dec!(30)
}
