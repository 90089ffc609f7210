//! Order Repository
//!
//! Order intake, lookup, listing, partial update and deletion. Creation is
//! transactional: the order row and all of its items commit together or
//! not at all.

use sqlx::SqlitePool;

use shared::models::{
    Order, OrderCreate, OrderItemWithNames, OrderUpdate, OrderWithItems, OrderWithTotal,
    PublicOrderStatus,
};
use shared::util::{now_millis, order_code, snowflake_id};

use crate::db::filter::OrderFilters;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_required_text,
};

use super::{RepoError, RepoResult, catalog};

const ORDER_COLUMNS: &str = "id, code, customer_name, customer_whatsapp, customer_email, \
     status, notes, admin_notes, created_at, updated_at";

/// Create an order together with its line items.
///
/// The stored `unit_price` is whatever the caller submitted; it is a
/// snapshot taken at order time, not a catalog lookup.
///
/// # Errors
///
/// - [`RepoError::Validation`] for missing contact fields, a malformed
///   email, an empty item list, non-positive quantities, negative or
///   non-finite prices, or references to unknown catalog entries.
pub async fn create_order_with_items(
    pool: &SqlitePool,
    input: OrderCreate,
) -> RepoResult<OrderWithItems> {
    validate_required_text(&input.customer_name, "customer_name", MAX_NAME_LEN)
        .map_err(RepoError::Validation)?;
    validate_required_text(&input.customer_whatsapp, "customer_whatsapp", MAX_NAME_LEN)
        .map_err(RepoError::Validation)?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN).map_err(RepoError::Validation)?;

    // Empty email means "not provided"
    let email = input
        .customer_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from);
    if let Some(email) = &email {
        validate_email(email).map_err(RepoError::Validation)?;
    }

    if input.items.is_empty() {
        return Err(RepoError::Validation(
            "order must contain at least one item".into(),
        ));
    }
    for (idx, item) in input.items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(RepoError::Validation(format!(
                "items[{idx}]: quantity must be at least 1"
            )));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(RepoError::Validation(format!(
                "items[{idx}]: unit_price must be a non-negative number"
            )));
        }
        if !catalog::product_exists(pool, item.product_id).await? {
            return Err(RepoError::Validation(format!(
                "items[{idx}]: unknown product {}",
                item.product_id
            )));
        }
        if let Some(variant_id) = item.variant_id
            && !catalog::variant_belongs_to_product(pool, variant_id, item.product_id).await?
        {
            return Err(RepoError::Validation(format!(
                "items[{idx}]: variant {variant_id} does not belong to product {}",
                item.product_id
            )));
        }
    }

    let order_id = snowflake_id();
    let code = order_code();
    let now = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO orders \
         (id, code, customer_name, customer_whatsapp, customer_email, status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 'pending', ?, ?, ?)",
    )
    .bind(order_id)
    .bind(&code)
    .bind(&input.customer_name)
    .bind(&input.customer_whatsapp)
    .bind(&email)
    .bind(&input.notes)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // Item ids grow sequentially from one snowflake so retrieval ordered
    // by id matches submission order.
    let first_item_id = snowflake_id();
    for (offset, item) in input.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_items \
             (id, order_id, product_id, variant_id, quantity, unit_price, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(first_item_id + offset as i64)
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.variant_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(order_id, code = %code, items = input.items.len(), "order created");

    get_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("order missing after insert".into()))
}

/// Fetch one order with its items and current catalog display names
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderWithItems>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(order) = order else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItemWithNames>(
        "SELECT oi.id, oi.order_id, oi.product_id, oi.variant_id, oi.quantity, \
                oi.unit_price, oi.created_at, \
                p.name AS product_name, v.name AS variant_name \
         FROM order_items oi \
         LEFT JOIN products p ON p.id = oi.product_id \
         LEFT JOIN product_variants v ON v.id = oi.variant_id \
         WHERE oi.order_id = ? \
         ORDER BY oi.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderWithItems { order, items }))
}

/// Minimal status projection for the unauthenticated code lookup
pub async fn get_public_by_code(
    pool: &SqlitePool,
    code: &str,
) -> RepoResult<Option<PublicOrderStatus>> {
    let row = sqlx::query_as::<_, PublicOrderStatus>(
        "SELECT code, customer_name, status, created_at FROM orders WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List orders with derived totals, newest first.
///
/// The total always sums every line of a selected order, even when an
/// item-level filter selected the order by a single matching line.
pub async fn list_with_totals(
    pool: &SqlitePool,
    filters: &OrderFilters,
) -> RepoResult<Vec<OrderWithTotal>> {
    let clause = filters.compile()?;
    let sql = format!(
        "SELECT o.id, o.code, o.customer_name, o.customer_whatsapp, o.customer_email, \
                o.status, o.notes, o.admin_notes, o.created_at, o.updated_at, \
                CAST(COALESCE(SUM(oi.quantity * oi.unit_price), 0) AS REAL) AS total \
         FROM orders o \
         LEFT JOIN order_items oi ON oi.order_id = o.id\
         {} \
         GROUP BY o.id \
         ORDER BY o.created_at DESC, o.id DESC",
        clause.where_clause()
    );

    let query = sqlx::query_as::<_, OrderWithTotal>(&sql);
    let rows = clause.bind_query_as(query).fetch_all(pool).await?;
    Ok(rows)
}

/// Apply a partial update to an order.
///
/// Returns `Ok(None)` when the order does not exist. An update with no
/// fields at all returns the order unchanged, `updated_at` untouched.
/// Empty-string notes clear the stored value.
pub async fn update_order(
    pool: &SqlitePool,
    id: i64,
    update: OrderUpdate,
) -> RepoResult<Option<OrderWithItems>> {
    let current = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(current) = current else {
        return Ok(None);
    };

    if update.is_empty() {
        return get_by_id(pool, id).await;
    }

    validate_optional_text(&update.notes, "notes", MAX_NOTE_LEN).map_err(RepoError::Validation)?;
    validate_optional_text(&update.admin_notes, "admin_notes", MAX_NOTE_LEN)
        .map_err(RepoError::Validation)?;

    // Only fields whose supplied value differs from the stored one are
    // written; `updated_at` moves only on a real change.
    let mut sets: Vec<&str> = Vec::new();
    let mut binds: Vec<Option<String>> = Vec::new();

    if let Some(next) = update.status {
        if !current.status.can_transition_to(next) {
            return Err(RepoError::Validation(format!(
                "status transition {} -> {next} is not allowed",
                current.status
            )));
        }
        if next != current.status {
            sets.push("status = ?");
            binds.push(Some(next.as_str().to_string()));
        }
    }
    if let Some(admin_notes) = update.admin_notes {
        let next = if admin_notes.is_empty() {
            None
        } else {
            Some(admin_notes)
        };
        if next != current.admin_notes {
            sets.push("admin_notes = ?");
            binds.push(next);
        }
    }
    if let Some(notes) = update.notes {
        let next = if notes.is_empty() { None } else { Some(notes) };
        if next != current.notes {
            sets.push("notes = ?");
            binds.push(next);
        }
    }

    if sets.is_empty() {
        return get_by_id(pool, id).await;
    }

    let sql = format!(
        "UPDATE orders SET {}, updated_at = ? WHERE id = ?",
        sets.join(", ")
    );
    let mut query = sqlx::query(&sql);
    for bind in binds {
        query = query.bind(bind);
    }
    query.bind(now_millis()).bind(id).execute(pool).await?;

    tracing::info!(order_id = id, "order updated");

    get_by_id(pool, id).await
}

/// Delete an order and (via cascade) its items. Idempotent.
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::info!(order_id = id, "order deleted");
    }
    Ok(deleted)
}
