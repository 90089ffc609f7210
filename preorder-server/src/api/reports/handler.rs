//! Reports API Handlers
//!
//! JSON report endpoints plus a CSV export of either report over the same
//! date window.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderName, header},
};

use shared::models::{SummaryReport, VariantSales};

use crate::core::ServerState;
use crate::db::filter::OrderFilters;
use crate::db::repository::report;
use crate::utils::{AppError, AppResult};

#[derive(serde::Deserialize, Default)]
pub struct ReportQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl ReportQuery {
    fn into_filters(self) -> OrderFilters {
        OrderFilters {
            start_date: self.start_date,
            end_date: self.end_date,
            ..Default::default()
        }
    }
}

#[derive(serde::Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// GET /api/reports/summary - order count, revenue, items sold (staff)
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<SummaryReport>> {
    let report = report::summary(&state.pool, &query.into_filters()).await?;
    Ok(Json(report))
}

/// GET /api/reports/by-variant - quantity sold per variant (staff)
pub async fn by_variant(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<VariantSales>>> {
    let rows = report::by_variant(&state.pool, &query.into_filters()).await?;
    Ok(Json(rows))
}

/// GET /api/reports/export?type=summary|by-variant - CSV download (staff)
pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<([(HeaderName, String); 2], String)> {
    let filters = OrderFilters {
        start_date: query.start_date,
        end_date: query.end_date,
        ..Default::default()
    };

    let (filename, csv) = match query.kind.as_str() {
        "summary" => {
            let report = report::summary(&state.pool, &filters).await?;
            ("summary_report.csv", summary_csv(&report))
        }
        "by-variant" => {
            let rows = report::by_variant(&state.pool, &filters).await?;
            ("by_variant_report.csv", by_variant_csv(&rows))
        }
        other => {
            return Err(AppError::invalid_request(format!(
                "unknown report type '{other}' (expected 'summary' or 'by-variant')"
            )));
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

fn summary_csv(report: &SummaryReport) -> String {
    format!(
        "total_orders,total_revenue,items_sold\n{},{},{}\n",
        report.total_orders, report.total_revenue, report.items_sold
    )
}

// Values are numbers and catalog names; no quoting applied.
fn by_variant_csv(rows: &[VariantSales]) -> String {
    let mut csv = String::from("variant_id,product_name,variant_name,qty_sold\n");
    for row in rows {
        let variant_id = row
            .variant_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{}\n",
            variant_id,
            row.product_name.as_deref().unwrap_or(""),
            row.variant_name.as_deref().unwrap_or(""),
            row.qty_sold
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_csv_layout() {
        let csv = summary_csv(&SummaryReport {
            total_orders: 2,
            total_revenue: 26.0,
            items_sold: 5,
        });
        assert_eq!(csv, "total_orders,total_revenue,items_sold\n2,26,5\n");
    }

    #[test]
    fn by_variant_csv_handles_missing_names() {
        let rows = vec![
            VariantSales {
                variant_id: Some(11),
                variant_name: Some("Size M".into()),
                product_name: Some("Classic Tee".into()),
                qty_sold: 3,
            },
            VariantSales {
                variant_id: None,
                variant_name: None,
                product_name: None,
                qty_sold: 1,
            },
        ];
        let csv = by_variant_csv(&rows);
        assert_eq!(
            csv,
            "variant_id,product_name,variant_name,qty_sold\n\
             11,Classic Tee,Size M,3\n\
             ,,,1\n"
        );
    }
}
