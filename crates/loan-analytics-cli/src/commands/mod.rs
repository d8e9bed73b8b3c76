pub mod prep;
pub mod profit;
