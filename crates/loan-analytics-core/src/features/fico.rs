use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// FICO score bands as reported at origination and at the last pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FicoInput {
    pub fico_range_low: Decimal,
    pub fico_range_high: Decimal,
    pub last_fico_range_low: Decimal,
    pub last_fico_range_high: Decimal,
}

/// Derived FICO features for the default-risk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FicoFeatures {
    /// Midpoint of the origination band.
    pub avg_fico_start: Decimal,
    /// Midpoint of the most recent band.
    pub avg_fico_current: Decimal,
    /// Current minus start; negative means the borrower slipped.
    pub fico_diff: Decimal,
    /// 1 when the score dropped since origination.
    pub fico_downgrade: u8,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Collapse the reported FICO bands into midpoints and a downgrade flag.
pub fn fico_features(input: &FicoInput) -> FicoFeatures {
    let two = dec!(2);
    let avg_fico_start = (input.fico_range_high + input.fico_range_low) / two;
    let avg_fico_current = (input.last_fico_range_high + input.last_fico_range_low) / two;
    let fico_diff = avg_fico_current - avg_fico_start;

    FicoFeatures {
        avg_fico_start,
        avg_fico_current,
        fico_diff,
        fico_downgrade: u8::from(fico_diff < Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_midpoints_and_diff() {
        let features = fico_features(&FicoInput {
            fico_range_low: dec!(660),
            fico_range_high: dec!(664),
            last_fico_range_low: dec!(700),
            last_fico_range_high: dec!(704),
        });
        assert_eq!(features.avg_fico_start, dec!(662));
        assert_eq!(features.avg_fico_current, dec!(702));
        assert_eq!(features.fico_diff, dec!(40));
        assert_eq!(features.fico_downgrade, 0);
    }

    #[test]
    fn test_downgrade_flag_set_on_score_drop() {
        let features = fico_features(&FicoInput {
            fico_range_low: dec!(700),
            fico_range_high: dec!(704),
            last_fico_range_low: dec!(640),
            last_fico_range_high: dec!(644),
        });
        assert_eq!(features.fico_diff, dec!(-60));
        assert_eq!(features.fico_downgrade, 1);
    }

    #[test]
    fn test_unchanged_score_is_not_a_downgrade() {
        let features = fico_features(&FicoInput {
            fico_range_low: dec!(700),
            fico_range_high: dec!(704),
            last_fico_range_low: dec!(700),
            last_fico_range_high: dec!(704),
        });
        assert_eq!(features.fico_diff, Decimal::ZERO);
        assert_eq!(features.fico_downgrade, 0);
    }
}
