//! HTTP handlers for reports and dashboard rollups

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use serde::Deserialize;
use shared::DateRange;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reporting::{
    CategoryGroup, DashboardStats, InventoryReportFilter, InventoryReportRow, LowStockAlert,
    ReportingService,
};
use crate::services::SettingsService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BreakdownQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Dashboard rollups for the current local day
pub async fn get_dashboard(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let service = ReportingService::new(state.db);
    let stats = service.dashboard(Local::now().date_naive()).await?;
    Ok(Json(stats))
}

/// Top low-stock SKUs
pub async fn get_low_stock_alerts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<LowStockAlert>>> {
    let settings = SettingsService::new(state.db.clone()).get().await?;
    let service = ReportingService::new(state.db);
    let alerts = service.low_stock_alerts(&settings).await?;
    Ok(Json(alerts))
}

/// Inventory report with stock status classification
pub async fn get_inventory_report(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<InventoryReportFilter>,
) -> AppResult<Json<Vec<InventoryReportRow>>> {
    let service = ReportingService::new(state.db);
    let rows = service.inventory_report(&filter).await?;
    Ok(Json(rows))
}

/// Category/platform movement breakdown; defaults to the current month
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<BreakdownQuery>,
) -> AppResult<Json<Vec<CategoryGroup>>> {
    let today = Local::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);
    let month_end = (month_start + Months::new(1)) - Duration::days(1);

    let range = DateRange {
        start: query.date_from.unwrap_or(month_start),
        end: query.date_to.unwrap_or(month_end),
    };

    let service = ReportingService::new(state.db);
    let breakdown = service.category_breakdown(range).await?;
    Ok(Json(breakdown))
}
