//! Transaction ledger
//!
//! Append-only history of inventory transactions. Appending happens only
//! inside the stock movement engine's atomic apply; this service is the
//! read surface. No update or delete exists anywhere for ledger records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{SourceType, TransactionDirection};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// An immutable ledger entry
#[derive(Debug, Clone, Serialize)]
pub struct InventoryTransaction {
    pub id: Uuid,
    pub direction: TransactionDirection,
    pub source_type: Option<SourceType>,
    pub reason_category_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub platform_id: Option<Uuid>,
    pub line_items: Vec<TransactionLineItem>,
    pub total_quantity: i64,
    pub total_amount: Decimal,
    pub platform_fee: Option<Decimal>,
    pub net_amount: Option<Decimal>,
    pub reference_number: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub created_by_name: String,
}

/// A line item embedded in a transaction. The code and product name are
/// frozen at transaction time so history stays readable after the SKU is
/// renamed or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionLineItem {
    pub sku_id: Uuid,
    pub sku_code: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    pub total_price: Decimal,
}

/// Ledger query filters; date range is inclusive
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub direction: Option<TransactionDirection>,
    pub sku_id: Option<Uuid>,
    pub platform_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub reason_category_id: Option<Uuid>,
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    direction: String,
    source_type: Option<String>,
    reason_category_id: Uuid,
    supplier_id: Option<Uuid>,
    platform_id: Option<Uuid>,
    total_quantity: i64,
    total_amount: Decimal,
    platform_fee: Option<Decimal>,
    net_amount: Option<Decimal>,
    reference_number: Option<String>,
    customer_name: Option<String>,
    notes: Option<String>,
    transaction_date: NaiveDate,
    created_at: DateTime<Utc>,
    created_by: Uuid,
    created_by_name: String,
}

#[derive(Debug, FromRow)]
struct LineItemRow {
    transaction_id: Uuid,
    sku_id: Uuid,
    sku_code: String,
    product_name: String,
    quantity: i64,
    unit_price: Decimal,
    unit_cost: Decimal,
    total_price: Decimal,
}

impl TransactionRow {
    fn into_transaction(self, line_items: Vec<TransactionLineItem>) -> AppResult<InventoryTransaction> {
        let direction = self
            .direction
            .parse::<TransactionDirection>()
            .map_err(AppError::Internal)?;
        let source_type = self
            .source_type
            .map(|s| s.parse::<SourceType>().map_err(AppError::Internal))
            .transpose()?;

        Ok(InventoryTransaction {
            id: self.id,
            direction,
            source_type,
            reason_category_id: self.reason_category_id,
            supplier_id: self.supplier_id,
            platform_id: self.platform_id,
            line_items,
            total_quantity: self.total_quantity,
            total_amount: self.total_amount,
            platform_fee: self.platform_fee,
            net_amount: self.net_amount,
            reference_number: self.reference_number,
            customer_name: self.customer_name,
            notes: self.notes,
            transaction_date: self.transaction_date,
            created_at: self.created_at,
            created_by: self.created_by,
            created_by_name: self.created_by_name,
        })
    }
}

const TRANSACTION_COLUMNS: &str = r#"
    id, direction, source_type, reason_category_id, supplier_id, platform_id,
    total_quantity, total_amount, platform_fee, net_amount, reference_number,
    customer_name, notes, transaction_date, created_at, created_by, created_by_name
"#;

impl LedgerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get one transaction with its line items.
    pub async fn get(&self, transaction_id: Uuid) -> AppResult<InventoryTransaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM inventory_transactions WHERE id = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;

        let lines = self.fetch_line_items(&[transaction_id]).await?;
        row.into_transaction(lines.into_iter().map(|l| l.1).collect())
    }

    /// Query the ledger by inclusive date range and optional filters,
    /// ordered by transaction date descending.
    pub async fn query(&self, filter: &TransactionFilter) -> AppResult<Vec<InventoryTransaction>> {
        let date_from = filter
            .date_from
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"));
        let date_to = filter
            .date_to
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2100, 12, 31).expect("valid date"));

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {}
            FROM inventory_transactions t
            WHERE t.transaction_date BETWEEN $1 AND $2
              AND ($3::TEXT IS NULL OR t.direction = $3)
              AND ($4::UUID IS NULL OR t.platform_id = $4)
              AND ($5::UUID IS NULL OR t.supplier_id = $5)
              AND ($6::UUID IS NULL OR t.reason_category_id = $6)
              AND ($7::UUID IS NULL OR EXISTS (
                    SELECT 1 FROM transaction_line_items li
                    WHERE li.transaction_id = t.id AND li.sku_id = $7
              ))
            ORDER BY t.transaction_date DESC, t.created_at DESC
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(date_from)
        .bind(date_to)
        .bind(filter.direction.map(|d| d.as_str()))
        .bind(filter.platform_id)
        .bind(filter.supplier_id)
        .bind(filter.reason_category_id)
        .bind(filter.sku_id)
        .fetch_all(&self.db)
        .await?;

        self.assemble(rows).await
    }

    /// Most recent n transactions by transaction date descending.
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<InventoryTransaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {}
            FROM inventory_transactions
            ORDER BY transaction_date DESC, created_at DESC
            LIMIT $1
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.db)
        .await?;

        self.assemble(rows).await
    }

    async fn assemble(&self, rows: Vec<TransactionRow>) -> AppResult<Vec<InventoryTransaction>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let mut lines_by_transaction: HashMap<Uuid, Vec<TransactionLineItem>> = HashMap::new();
        for (transaction_id, line) in self.fetch_line_items(&ids).await? {
            lines_by_transaction
                .entry(transaction_id)
                .or_default()
                .push(line);
        }

        rows.into_iter()
            .map(|row| {
                let own = lines_by_transaction.remove(&row.id).unwrap_or_default();
                row.into_transaction(own)
            })
            .collect()
    }

    async fn fetch_line_items(
        &self,
        transaction_ids: &[Uuid],
    ) -> AppResult<Vec<(Uuid, TransactionLineItem)>> {
        if transaction_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT transaction_id, sku_id, sku_code, product_name, quantity,
                   unit_price, unit_cost, total_price
            FROM transaction_line_items
            WHERE transaction_id = ANY($1)
            ORDER BY transaction_id, line_no
            "#,
        )
        .bind(transaction_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.transaction_id,
                    TransactionLineItem {
                        sku_id: r.sku_id,
                        sku_code: r.sku_code,
                        product_name: r.product_name,
                        quantity: r.quantity,
                        unit_price: r.unit_price,
                        unit_cost: r.unit_cost,
                        total_price: r.total_price,
                    },
                )
            })
            .collect())
    }
}
