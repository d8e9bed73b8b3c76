use serde::{Deserialize, Serialize};

/// Statuses under which a loan's outcome is settled and it no longer accrues.
pub const CLOSED_STATUSES: [&str; 3] = ["Fully Paid", "Default", "Charged Off"];

/// Binary training labels derived from a categorical loan status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLabels {
    /// 1 while the loan is still open (Current, Late, In Grace Period, ...).
    pub active_loan: u8,
    /// 1 unless the loan was fully paid. Open loans count as 1 here too;
    /// the label is only meaningful once the loan has closed.
    pub default: u8,
}

/// Map a loan status string onto the `active_loan` / `default` label pair.
pub fn derive_targets(status: &str) -> TargetLabels {
    let closed = CLOSED_STATUSES.contains(&status);
    TargetLabels {
        active_loan: u8::from(!closed),
        default: u8::from(status != "Fully Paid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_paid_is_closed_and_not_default() {
        let labels = derive_targets("Fully Paid");
        assert_eq!(labels.active_loan, 0);
        assert_eq!(labels.default, 0);
    }

    #[test]
    fn test_charged_off_is_closed_default() {
        let labels = derive_targets("Charged Off");
        assert_eq!(labels.active_loan, 0);
        assert_eq!(labels.default, 1);
    }

    #[test]
    fn test_default_status_is_closed_default() {
        let labels = derive_targets("Default");
        assert_eq!(labels.active_loan, 0);
        assert_eq!(labels.default, 1);
    }

    #[test]
    fn test_current_is_active() {
        let labels = derive_targets("Current");
        assert_eq!(labels.active_loan, 1);
        assert_eq!(labels.default, 1);
    }

    #[test]
    fn test_late_is_active() {
        let labels = derive_targets("Late (31-120 days)");
        assert_eq!(labels.active_loan, 1);
        assert_eq!(labels.default, 1);
    }
}
