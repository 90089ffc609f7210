//! Dynamic WHERE-clause construction for order listing and reports.
//!
//! Filters arrive as loosely-typed query parameters and are compiled once
//! into a [`FilterClause`]: a list of SQL conditions plus typed bindings
//! that can be applied to any query over the `orders` table (aliased `o`).
//!
//! Item-level filters (product, variant) are expressed as an EXISTS
//! subquery against `order_items`, so they select whole orders that
//! contain at least one matching line. Listing totals and report sums
//! therefore always cover every line of a selected order, never just the
//! matching lines.

use chrono::NaiveDate;
use shared::models::OrderStatus;
use sqlx::{Sqlite, query::Query, query::QueryAs};

use crate::db::repository::{RepoError, RepoResult};

/// Raw order filters as received from the API layer
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub product_id: Option<i64>,
    pub variant_id: Option<i64>,
    /// Inclusive window start, `YYYY-MM-DD` (UTC)
    pub start_date: Option<String>,
    /// Inclusive window end, `YYYY-MM-DD` (UTC)
    pub end_date: Option<String>,
}

/// Typed binding slot for a compiled condition
#[derive(Debug, Clone)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// Compiled WHERE conditions with their bindings, in placeholder order
#[derive(Debug, Clone, Default)]
pub struct FilterClause {
    conditions: Vec<String>,
    bindings: Vec<BindValue>,
}

impl OrderFilters {
    /// Compile filters into SQL conditions over `orders o`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Validation`] for malformed dates.
    pub fn compile(&self) -> RepoResult<FilterClause> {
        let mut clause = FilterClause::default();

        if let Some(status) = self.status {
            clause.conditions.push("o.status = ?".into());
            clause.bindings.push(BindValue::Text(status.as_str().into()));
        }

        // Product and variant combine into one EXISTS subquery so both
        // constraints must hold on the same order line.
        if self.product_id.is_some() || self.variant_id.is_some() {
            let mut item_conditions = Vec::new();
            if let Some(product_id) = self.product_id {
                item_conditions.push("oi.product_id = ?");
                clause.bindings.push(BindValue::Integer(product_id));
            }
            if let Some(variant_id) = self.variant_id {
                item_conditions.push("oi.variant_id = ?");
                clause.bindings.push(BindValue::Integer(variant_id));
            }
            clause.conditions.push(format!(
                "EXISTS (SELECT 1 FROM order_items oi WHERE oi.order_id = o.id AND {})",
                item_conditions.join(" AND ")
            ));
        }

        if let Some(start) = &self.start_date {
            let millis = day_start_millis(start)?;
            clause.conditions.push("o.created_at >= ?".into());
            clause.bindings.push(BindValue::Integer(millis));
        }

        if let Some(end) = &self.end_date {
            let millis = day_end_millis(end)?;
            clause.conditions.push("o.created_at <= ?".into());
            clause.bindings.push(BindValue::Integer(millis));
        }

        Ok(clause)
    }
}

impl FilterClause {
    /// Build the WHERE clause (empty string if no conditions)
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Apply bindings to a SQLx query
    pub fn bind_query<'a, 'b>(
        &'b self,
        mut query: Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> Query<'a, Sqlite, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                BindValue::Text(s) => query.bind(s),
                BindValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }

    /// Apply bindings to a SQLx query_as
    pub fn bind_query_as<'a, 'b, O>(
        &'b self,
        mut query: QueryAs<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, <Sqlite as sqlx::Database>::Arguments<'a>>
    where
        O: Send + Unpin,
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                BindValue::Text(s) => query.bind(s),
                BindValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }
}

fn parse_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::Validation(format!("Invalid date (expected YYYY-MM-DD): {value}")))
}

/// 00:00:00.000 UTC of the given day, as epoch millis
pub fn day_start_millis(value: &str) -> RepoResult<i64> {
    let date = parse_date(value)?;
    let dt = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| RepoError::Validation(format!("Invalid date: {value}")))?;
    Ok(dt.and_utc().timestamp_millis())
}

/// 23:59:59.999 UTC of the given day, as epoch millis
pub fn day_end_millis(value: &str) -> RepoResult<i64> {
    let date = parse_date(value)?;
    let dt = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| RepoError::Validation(format!("Invalid date: {value}")))?;
    Ok(dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_compile_to_no_clause() {
        let clause = OrderFilters::default().compile().unwrap();
        assert_eq!(clause.where_clause(), "");
    }

    #[test]
    fn status_filter() {
        let filters = OrderFilters {
            status: Some(OrderStatus::Confirmed),
            ..Default::default()
        };
        let clause = filters.compile().unwrap();
        assert_eq!(clause.where_clause(), " WHERE o.status = ?");
    }

    #[test]
    fn product_and_variant_share_one_exists() {
        let filters = OrderFilters {
            product_id: Some(1),
            variant_id: Some(2),
            ..Default::default()
        };
        let clause = filters.compile().unwrap();
        assert_eq!(
            clause.where_clause(),
            " WHERE EXISTS (SELECT 1 FROM order_items oi \
             WHERE oi.order_id = o.id AND oi.product_id = ? AND oi.variant_id = ?)"
        );
    }

    #[test]
    fn date_window_is_inclusive() {
        let filters = OrderFilters {
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-01-01".into()),
            ..Default::default()
        };
        let clause = filters.compile().unwrap();
        assert_eq!(
            clause.where_clause(),
            " WHERE o.created_at >= ? AND o.created_at <= ?"
        );
        // 2025-01-01 spans exactly one day minus one millisecond
        let start = day_start_millis("2025-01-01").unwrap();
        let end = day_end_millis("2025-01-01").unwrap();
        assert_eq!(end - start, 86_400_000 - 1);
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(day_start_millis("01/01/2025").is_err());
        assert!(day_start_millis("2025-13-01").is_err());
        assert!(day_end_millis("").is_err());
    }
}
