use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LoanAnalyticsError;
use crate::types::Rate;
use crate::LoanAnalyticsResult;

/// Parse a percentage string such as `5.3%` (or bare `5.3`) into a decimal rate.
pub fn parse_percentage(raw: &str) -> LoanAnalyticsResult<Rate> {
    let trimmed = raw.trim().trim_end_matches('%').trim_end();
    let value = Decimal::from_str(trimmed).map_err(|_| LoanAnalyticsError::InvalidInput {
        field: "percentage".into(),
        reason: format!("'{raw}' is not a percentage"),
    })?;
    Ok(value / dec!(100))
}

/// Extract the integer month count from a term string such as `36 months`.
pub fn parse_term(raw: &str) -> LoanAnalyticsResult<u32> {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().map_err(|_| LoanAnalyticsError::InvalidInput {
        field: "term".into(),
        reason: format!("'{raw}' contains no month count"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_percentage_with_sign() {
        assert_eq!(parse_percentage("5.3%").unwrap(), dec!(0.053));
        assert_eq!(parse_percentage(" 13.49% ").unwrap(), dec!(0.1349));
    }

    #[test]
    fn test_parse_percentage_bare_number() {
        assert_eq!(parse_percentage("12").unwrap(), dec!(0.12));
    }

    #[test]
    fn test_parse_percentage_rejects_garbage() {
        assert!(parse_percentage("n/a").is_err());
        assert!(parse_percentage("%").is_err());
    }

    #[test]
    fn test_parse_term_standard_forms() {
        assert_eq!(parse_term("36 months").unwrap(), 36);
        assert_eq!(parse_term(" 60 months").unwrap(), 60);
        assert_eq!(parse_term("36").unwrap(), 36);
    }

    #[test]
    fn test_parse_term_rejects_no_digits() {
        assert!(parse_term("months").is_err());
        assert!(parse_term("").is_err());
    }
}
