//! Report Models

use serde::{Deserialize, Serialize};

/// Aggregate summary over an optional date window.
///
/// All fields default to zero when nothing matches; none of them is ever
/// absent or null on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SummaryReport {
    /// Count of distinct orders in the window, with or without items
    pub total_orders: i64,
    /// Σ(quantity × unit_price) over items of matching orders
    pub total_revenue: f64,
    /// Σ(quantity) over items of matching orders
    pub items_sold: i64,
}

/// Per-variant sales row.
///
/// Items without a variant group under a `variant_id = NULL` row per
/// product; that row is never merged with variant-bearing rows of the
/// same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VariantSales {
    pub variant_id: Option<i64>,
    pub variant_name: Option<String>,
    pub product_name: Option<String>,
    pub qty_sold: i64,
}
