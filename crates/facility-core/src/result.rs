//! Convenience result type alias for the facility crates.

use crate::error::AppError;

/// A specialized `Result` type for facility operations.
pub type AppResult<T> = Result<T, AppError>;
