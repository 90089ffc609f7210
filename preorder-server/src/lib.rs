//! Preorder Hub Server - order intake and back office for pre-order retail
//!
//! # Module structure
//!
//! ```text
//! preorder-server/src/
//! ├── core/          # Configuration, state, server lifecycle
//! ├── auth/          # Gateway identity headers, staff gate
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, filters, repositories
//! └── utils/         # Logging, validation
//! ```
//!
//! Customers place orders and check their status by code; staff manage the
//! order lifecycle and pull sales reports. Authentication happens at the
//! access gateway, which forwards the caller's role as request headers.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CallerRole, CurrentCaller};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
