//! Convenience result type alias for Portal TI.

use crate::error::AppError;

/// A specialized `Result` type for Portal TI operations.
pub type AppResult<T> = Result<T, AppError>;
