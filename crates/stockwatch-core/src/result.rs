//! Convenience result type alias for StockWatch.

use crate::error::AppError;

/// A specialized `Result` type for StockWatch operations.
pub type AppResult<T> = Result<T, AppError>;
