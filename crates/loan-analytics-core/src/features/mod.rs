//! Model-feature construction from cleaned loan columns.

pub mod fico;

pub use fico::{fico_features, FicoFeatures, FicoInput};
