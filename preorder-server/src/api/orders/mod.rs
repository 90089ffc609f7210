//! Orders API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // Public routes: order intake and the status lookup by code
    let public_routes = Router::new()
        .route("/", post(handler::create))
        .route("/public/by-code/{code}", get(handler::public_by_code));

    // Staff routes: listing, detail, update, delete
    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_staff));

    public_routes.merge(staff_routes)
}
