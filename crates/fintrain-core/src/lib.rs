pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "cash_flow")]
pub mod cash_flow;

#[cfg(feature = "credit_score")]
pub mod credit_score;

pub use error::FinTrainError;
pub use types::*;

/// Standard result type for all fintrain operations
pub type FinTrainResult<T> = Result<T, FinTrainError>;
