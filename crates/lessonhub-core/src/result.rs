//! Convenience result type alias for LessonHub.

use crate::error::AppError;

/// A specialized `Result` type for LessonHub infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;
