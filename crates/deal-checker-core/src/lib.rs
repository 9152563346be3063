pub mod deal;
pub mod error;
pub mod types;

#[cfg(feature = "analytics")]
pub mod analytics;

pub use error::DealCheckerError;
pub use types::*;

/// Standard result type for all fallible deal-checker operations
pub type DealCheckerResult<T> = Result<T, DealCheckerError>;
