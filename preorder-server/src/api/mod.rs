//! API Module
//!
//! One submodule per resource, each exposing a `router()`. Gateway
//! identity headers are parsed once here for every route; staff-only
//! routers apply `require_staff` themselves.

pub mod health;
pub mod orders;
pub mod reports;

use axum::{Router, middleware};

use crate::auth::extract_caller;
use crate::core::ServerState;

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(reports::router())
        .layer(middleware::from_fn(extract_caller))
        .with_state(state)
}
