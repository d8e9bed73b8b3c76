pub mod error;
pub mod types;

#[cfg(feature = "profit")]
pub mod profit;

#[cfg(feature = "prep")]
pub mod prep;

#[cfg(feature = "fico")]
pub mod features;

pub use error::LoanAnalyticsError;
pub use types::*;

/// Standard result type for all loan-analytics operations
pub type LoanAnalyticsResult<T> = Result<T, LoanAnalyticsError>;
