//! Sales Reports
//!
//! Read-only aggregations over orders and their items. Both reports honor
//! the same filters as the order listing, so a staff view and its report
//! always agree on which orders are in scope.

use sqlx::SqlitePool;

use shared::models::{SummaryReport, VariantSales};

use crate::db::filter::OrderFilters;

use super::RepoResult;

/// Order count, revenue and items sold over the filtered set
pub async fn summary(pool: &SqlitePool, filters: &OrderFilters) -> RepoResult<SummaryReport> {
    let clause = filters.compile()?;
    let sql = format!(
        "SELECT COUNT(DISTINCT o.id) AS total_orders, \
                CAST(COALESCE(SUM(oi.quantity * oi.unit_price), 0) AS REAL) AS total_revenue, \
                COALESCE(SUM(oi.quantity), 0) AS items_sold \
         FROM orders o \
         LEFT JOIN order_items oi ON oi.order_id = o.id\
         {}",
        clause.where_clause()
    );

    let query = sqlx::query_as::<_, SummaryReport>(&sql);
    let report = clause.bind_query_as(query).fetch_one(pool).await?;
    Ok(report)
}

/// Quantity sold per variant, best sellers first.
///
/// Lines ordered without a variant group together under a null variant.
/// Display names come from the current catalog and are null when the
/// catalog entry no longer exists.
pub async fn by_variant(pool: &SqlitePool, filters: &OrderFilters) -> RepoResult<Vec<VariantSales>> {
    let clause = filters.compile()?;
    let sql = format!(
        "SELECT oi.variant_id, v.name AS variant_name, p.name AS product_name, \
                SUM(oi.quantity) AS qty_sold \
         FROM orders o \
         JOIN order_items oi ON oi.order_id = o.id \
         LEFT JOIN product_variants v ON v.id = oi.variant_id \
         LEFT JOIN products p ON p.id = oi.product_id\
         {} \
         GROUP BY oi.variant_id, v.name, p.name \
         ORDER BY qty_sold DESC",
        clause.where_clause()
    );

    let query = sqlx::query_as::<_, VariantSales>(&sql);
    let rows = clause.bind_query_as(query).fetch_all(pool).await?;
    Ok(rows)
}
