//! Reports API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    // All reporting is staff-only
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/by-variant", get(handler::by_variant))
        .route("/export", get(handler::export))
        .layer(middleware::from_fn(require_staff))
}
