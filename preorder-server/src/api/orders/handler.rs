//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use shared::models::{
    OrderCreate, OrderStatus, OrderUpdate, OrderWithItems, OrderWithTotal, PublicOrderStatus,
};

use crate::core::ServerState;
use crate::db::filter::OrderFilters;
use crate::db::repository::order;
use crate::utils::{AppError, AppResult};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    #[serde(rename = "productId")]
    pub product_id: Option<i64>,
    #[serde(rename = "variantId")]
    pub variant_id: Option<i64>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl ListQuery {
    fn into_filters(self) -> OrderFilters {
        OrderFilters {
            status: self.status,
            product_id: self.product_id,
            variant_id: self.variant_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// POST /api/orders - place an order (public)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderWithItems>)> {
    let created = order::create_order_with_items(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/orders/public/by-code/:code - status lookup by order code (public)
pub async fn public_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<PublicOrderStatus>> {
    let status = order::get_public_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {code}")))?;
    Ok(Json(status))
}

/// GET /api/orders - list orders with totals, newest first (staff)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithTotal>>> {
    let orders = order::list_with_totals(&state.pool, &query.into_filters()).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - order detail with items (staff)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithItems>> {
    let detail = order::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(detail))
}

/// PATCH /api/orders/:id - partial update (staff)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderWithItems>> {
    let updated = order::update_order(&state.pool, id, payload)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(updated))
}

/// DELETE /api/orders/:id - remove an order and its items (staff)
///
/// Idempotent: an unknown id still responds 204.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    order::delete_by_id(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
