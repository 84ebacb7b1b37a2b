//! Reporting service
//!
//! Pure derivations over the catalog and the transaction ledger: stock
//! status, low-stock alerts, dashboard rollups, and the category/platform
//! movement breakdown. Nothing in here mutates state.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{stock_status, DateRange, StockStatus, SystemSettings};
use sqlx::{FromRow, PgPool};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::error::AppResult;

#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Dashboard rollups
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_skus: i64,
    pub total_on_hand: i64,
    pub total_value: Decimal,
    pub low_stock_count: i64,
    pub out_of_stock_count: i64,
    pub today_revenue: Decimal,
    pub today_transactions: i64,
    pub weekly_revenue: Vec<DailyRevenue>,
}

/// One day of OUT revenue, labeled by weekday for display
#[derive(Debug, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub label: String,
    pub revenue: Decimal,
    pub count: i64,
}

/// One low-stock alert entry
#[derive(Debug, Serialize)]
pub struct LowStockAlert {
    pub sku_id: Uuid,
    pub sku_code: String,
    pub product_name: String,
    pub stock: i64,
    pub reorder_point: i64,
    pub status: StockStatus,
}

/// One row of the inventory report
#[derive(Debug, Serialize)]
pub struct InventoryReportRow {
    pub sku_id: Uuid,
    pub sku_code: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub size_name: Option<String>,
    pub color_name: Option<String>,
    pub price: Decimal,
    pub cost: Decimal,
    pub stock: i64,
    pub reorder_point: i64,
    pub stock_value: Decimal,
    pub status: StockStatus,
}

/// Inventory report filters
#[derive(Debug, Default, Deserialize)]
pub struct InventoryReportFilter {
    pub category_id: Option<Uuid>,
    pub status: Option<StockStatus>,
}

/// In/out quantities routed to one platform bucket
#[derive(Debug, Default, Serialize)]
pub struct PlatformMovement {
    pub stock_in: i64,
    pub stock_out: i64,
}

/// Per-SKU movement summary over a date-bounded ledger slice
#[derive(Debug, Serialize)]
pub struct SkuMovementSummary {
    pub sku_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku_code: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub size_name: Option<String>,
    pub color_name: Option<String>,
    pub current_stock: i64,
    pub total_stock_in: i64,
    pub total_stock_out: i64,
    /// Keyed by platform id, plus a synthetic "none" bucket for
    /// transactions without one
    pub platform_breakdown: BTreeMap<String, PlatformMovement>,
}

/// Movement summaries grouped by product category
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category_name: String,
    pub rows: Vec<SkuMovementSummary>,
}

#[derive(Debug, FromRow)]
struct CatalogCounts {
    total_products: i64,
    total_skus: i64,
    total_on_hand: i64,
    total_value: Decimal,
    low_stock_count: i64,
    out_of_stock_count: i64,
}

#[derive(Debug, FromRow)]
struct DayRevenueRow {
    transaction_date: NaiveDate,
    revenue: Decimal,
    count: i64,
}

#[derive(Debug, FromRow)]
struct LowStockRow {
    sku_id: Uuid,
    sku_code: String,
    product_name: String,
    stock: i64,
    reorder_point: i64,
}

#[derive(Debug, FromRow)]
struct ReportRow {
    sku_id: Uuid,
    sku_code: String,
    product_id: Uuid,
    product_name: String,
    category_id: Uuid,
    category_name: String,
    size_name: Option<String>,
    color_name: Option<String>,
    price: Decimal,
    cost: Decimal,
    stock: i64,
    reorder_point: i64,
}

#[derive(Debug, FromRow)]
struct SkuMetaRow {
    sku_id: Uuid,
    product_id: Uuid,
    product_name: String,
    sku_code: String,
    category_id: Uuid,
    category_name: String,
    size_name: Option<String>,
    color_name: Option<String>,
    stock: i64,
}

#[derive(Debug, FromRow)]
struct MovementRow {
    direction: String,
    platform_id: Option<Uuid>,
    sku_id: Uuid,
    quantity: i64,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Dashboard rollups for the given local day.
    pub async fn dashboard(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let counts = sqlx::query_as::<_, CatalogCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products WHERE is_active) AS total_products,
                (SELECT COUNT(*) FROM skus WHERE is_active) AS total_skus,
                (SELECT COALESCE(SUM(stock), 0)::BIGINT FROM skus WHERE is_active) AS total_on_hand,
                (SELECT COALESCE(SUM(stock * cost), 0) FROM skus WHERE is_active) AS total_value,
                (SELECT COUNT(*) FROM skus WHERE is_active AND stock > 0 AND stock <= reorder_point) AS low_stock_count,
                (SELECT COUNT(*) FROM skus WHERE is_active AND stock <= 0) AS out_of_stock_count
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let (today_revenue, today_transactions): (Decimal, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM inventory_transactions
            WHERE direction = 'OUT' AND transaction_date = $1
            "#,
        )
        .bind(today)
        .fetch_one(&self.db)
        .await?;

        // Trailing 7-day window, inclusive of today
        let week_start = today - Duration::days(6);
        let day_rows = sqlx::query_as::<_, DayRevenueRow>(
            r#"
            SELECT transaction_date, COALESCE(SUM(total_amount), 0) AS revenue, COUNT(*) AS count
            FROM inventory_transactions
            WHERE direction = 'OUT' AND transaction_date BETWEEN $1 AND $2
            GROUP BY transaction_date
            "#,
        )
        .bind(week_start)
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        let by_date: HashMap<NaiveDate, (Decimal, i64)> = day_rows
            .into_iter()
            .map(|r| (r.transaction_date, (r.revenue, r.count)))
            .collect();

        let weekly_revenue = (0..7)
            .map(|offset| {
                let date = week_start + Duration::days(offset);
                let (revenue, count) = by_date.get(&date).copied().unwrap_or((Decimal::ZERO, 0));
                DailyRevenue {
                    date,
                    label: date.format("%a").to_string(),
                    revenue,
                    count,
                }
            })
            .collect();

        Ok(DashboardStats {
            total_products: counts.total_products,
            total_skus: counts.total_skus,
            total_on_hand: counts.total_on_hand,
            total_value: counts.total_value,
            low_stock_count: counts.low_stock_count,
            out_of_stock_count: counts.out_of_stock_count,
            today_revenue,
            today_transactions,
            weekly_revenue,
        })
    }

    /// Active SKUs at or below their reorder point, lowest stock first,
    /// capped to the top 10. Empty when alerts are disabled in settings.
    pub async fn low_stock_alerts(
        &self,
        settings: &SystemSettings,
    ) -> AppResult<Vec<LowStockAlert>> {
        if !settings.enable_low_stock_alerts {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT s.id AS sku_id, s.sku_code, p.name AS product_name,
                   s.stock, s.reorder_point
            FROM skus s
            JOIN products p ON p.id = s.product_id
            WHERE s.is_active AND s.stock <= s.reorder_point
            ORDER BY s.stock ASC, s.sku_code ASC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LowStockAlert {
                status: stock_status(r.stock, r.reorder_point),
                sku_id: r.sku_id,
                sku_code: r.sku_code,
                product_name: r.product_name,
                stock: r.stock,
                reorder_point: r.reorder_point,
            })
            .collect())
    }

    /// Per-SKU inventory report with status classification, optionally
    /// filtered by category and status.
    pub async fn inventory_report(
        &self,
        filter: &InventoryReportFilter,
    ) -> AppResult<Vec<InventoryReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT s.id AS sku_id, s.sku_code, p.id AS product_id, p.name AS product_name,
                   c.id AS category_id, c.name AS category_name,
                   sz.name AS size_name, col.name AS color_name,
                   s.price, s.cost, s.stock, s.reorder_point
            FROM skus s
            JOIN products p ON p.id = s.product_id
            JOIN categories c ON c.id = p.category_id
            LEFT JOIN sizes sz ON sz.id = s.size_id
            LEFT JOIN colors col ON col.id = s.color_id
            WHERE s.is_active
              AND ($1::UUID IS NULL OR p.category_id = $1)
            ORDER BY p.name, s.sku_code
            "#,
        )
        .bind(filter.category_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| InventoryReportRow {
                status: stock_status(r.stock, r.reorder_point),
                stock_value: Decimal::from(r.stock) * r.cost,
                sku_id: r.sku_id,
                sku_code: r.sku_code,
                product_id: r.product_id,
                product_name: r.product_name,
                category_id: r.category_id,
                category_name: r.category_name,
                size_name: r.size_name,
                color_name: r.color_name,
                price: r.price,
                cost: r.cost,
                stock: r.stock,
                reorder_point: r.reorder_point,
            })
            .filter(|row| filter.status.map_or(true, |s| row.status == s))
            .collect())
    }

    /// Movement breakdown over a date-bounded ledger slice: one summary
    /// row per SKU with a per-platform in/out matrix, grouped by the
    /// product's category.
    pub async fn category_breakdown(&self, range: DateRange) -> AppResult<Vec<CategoryGroup>> {
        let sku_rows = sqlx::query_as::<_, SkuMetaRow>(
            r#"
            SELECT s.id AS sku_id, s.product_id, p.name AS product_name, s.sku_code,
                   c.id AS category_id, c.name AS category_name,
                   sz.name AS size_name, col.name AS color_name, s.stock
            FROM skus s
            JOIN products p ON p.id = s.product_id
            JOIN categories c ON c.id = p.category_id
            LEFT JOIN sizes sz ON sz.id = s.size_id
            LEFT JOIN colors col ON col.id = s.color_id
            ORDER BY p.name, s.sku_code
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let platform_ids =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM platforms ORDER BY name")
                .fetch_all(&self.db)
                .await?;

        let movements = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT t.direction, t.platform_id, li.sku_id, li.quantity
            FROM inventory_transactions t
            JOIN transaction_line_items li ON li.transaction_id = t.id
            WHERE t.transaction_date BETWEEN $1 AND $2
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        // Initialize one summary per SKU with empty buckets for every
        // platform plus the synthetic "none" bucket
        let mut summaries: HashMap<Uuid, SkuMovementSummary> = sku_rows
            .into_iter()
            .map(|r| {
                let mut platform_breakdown: BTreeMap<String, PlatformMovement> = platform_ids
                    .iter()
                    .map(|id| (id.to_string(), PlatformMovement::default()))
                    .collect();
                platform_breakdown.insert("none".to_string(), PlatformMovement::default());

                (
                    r.sku_id,
                    SkuMovementSummary {
                        sku_id: r.sku_id,
                        product_id: r.product_id,
                        product_name: r.product_name,
                        sku_code: r.sku_code,
                        category_id: r.category_id,
                        category_name: r.category_name,
                        size_name: r.size_name,
                        color_name: r.color_name,
                        current_stock: r.stock,
                        total_stock_in: 0,
                        total_stock_out: 0,
                        platform_breakdown,
                    },
                )
            })
            .collect();

        // Route every line item's quantity into the (sku, platform) cell
        // matching the transaction's direction
        for movement in movements {
            let Some(summary) = summaries.get_mut(&movement.sku_id) else {
                continue;
            };
            let key = movement
                .platform_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string());

            match movement.direction.as_str() {
                "IN" => {
                    summary.total_stock_in += movement.quantity;
                    if let Some(bucket) = summary.platform_breakdown.get_mut(&key) {
                        bucket.stock_in += movement.quantity;
                    }
                }
                "OUT" => {
                    summary.total_stock_out += movement.quantity;
                    if let Some(bucket) = summary.platform_breakdown.get_mut(&key) {
                        bucket.stock_out += movement.quantity;
                    }
                }
                _ => {}
            }
        }

        // Group by category name for display
        let mut groups: BTreeMap<String, Vec<SkuMovementSummary>> = BTreeMap::new();
        for summary in summaries.into_values() {
            groups
                .entry(summary.category_name.clone())
                .or_default()
                .push(summary);
        }

        Ok(groups
            .into_iter()
            .map(|(category_name, mut rows)| {
                rows.sort_by(|a, b| {
                    a.product_name
                        .cmp(&b.product_name)
                        .then_with(|| a.sku_code.cmp(&b.sku_code))
                });
                CategoryGroup {
                    category_name,
                    rows,
                }
            })
            .collect())
    }
}
