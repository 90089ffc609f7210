//! Shared types for the Preorder Hub platform.
//!
//! Contents:
//! - [`error`]: unified error system ([`ErrorCode`], [`AppError`], [`ApiResponse`])
//! - [`models`]: order/report entities and request payloads
//! - [`util`]: id generation and millisecond timestamps

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
