//! Convenience result type alias for EduHub.

use crate::error::AppError;

/// A specialized `Result` type for EduHub operations.
pub type AppResult<T> = Result<T, AppError>;
