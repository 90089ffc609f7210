//! Utility modules: logging and input validation helpers.

pub mod logger;
pub mod validation;

// Re-export error types so crate code can use `crate::utils::AppError`.
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
