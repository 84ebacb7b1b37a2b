//! Stock movement engine
//!
//! The only code path that changes SKU stock. A submitted movement is
//! validated fail-fast, then applied as one database transaction: the
//! ledger append and every stock adjustment commit together or not at all.
//! Referenced SKU rows are locked (`SELECT ... FOR UPDATE`) so the
//! oversell check runs against current stock at commit time; two
//! concurrent submissions against the same SKU serialize and the second
//! sees the first's decrement.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    line_total, net_amount, platform_fee, validate_quantity, validate_unit_amount, AuditAction,
    SourceType, SystemSettings, TransactionDirection,
};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::services::audit::{AuditEntry, AuditService};
use crate::services::ledger::{InventoryTransaction, LedgerService};

#[derive(Clone)]
pub struct StockMovementService {
    db: PgPool,
}

/// One line of a Stock In submission
#[derive(Debug, Deserialize)]
pub struct StockInLine {
    pub sku_id: Uuid,
    pub quantity: i64,
    pub unit_cost: Decimal,
}

/// Stock In: receive units against IN-direction reasons
#[derive(Debug, Deserialize)]
pub struct StockInInput {
    pub source_type: SourceType,
    pub reason_category_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub line_items: Vec<StockInLine>,
}

/// One line of a Stock Out submission
#[derive(Debug, Deserialize)]
pub struct StockOutLine {
    pub sku_id: Uuid,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// Stock Out: sell or remove units against OUT-direction reasons
#[derive(Debug, Deserialize)]
pub struct StockOutInput {
    pub reason_category_id: Uuid,
    pub platform_id: Option<Uuid>,
    pub reference_number: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub line_items: Vec<StockOutLine>,
}

/// One line of an adjustment; prices are taken from the SKU
#[derive(Debug, Deserialize)]
pub struct AdjustmentLine {
    pub sku_id: Uuid,
    pub quantity: i64,
}

/// Adjustment: the stock direction is implied by the reason category,
/// and the ledger entry is tagged ADJUSTMENT.
#[derive(Debug, Deserialize)]
pub struct AdjustmentInput {
    pub reason_category_id: Uuid,
    pub notes: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub line_items: Vec<AdjustmentLine>,
}

#[derive(Debug, FromRow)]
struct ReasonRow {
    direction: String,
    requires_platform: bool,
    requires_supplier: bool,
    is_active: bool,
}

#[derive(Debug, FromRow)]
struct PlatformRow {
    name: String,
    fee_percentage: Decimal,
    is_active: bool,
}

#[derive(Debug, FromRow)]
struct LockedSku {
    id: Uuid,
    sku_code: String,
    product_name: String,
    price: Decimal,
    cost: Decimal,
    stock: i64,
    is_active: bool,
}

#[derive(Debug)]
struct DraftLine {
    sku_id: Uuid,
    quantity: i64,
    unit_price: Option<Decimal>,
    unit_cost: Option<Decimal>,
}

#[derive(Debug)]
struct Draft {
    direction: TransactionDirection,
    source_type: Option<SourceType>,
    reason_category_id: Uuid,
    supplier_id: Option<Uuid>,
    platform_id: Option<Uuid>,
    reference_number: Option<String>,
    customer_name: Option<String>,
    notes: Option<String>,
    transaction_date: NaiveDate,
    lines: Vec<DraftLine>,
}

/// Line item with the SKU snapshot frozen in
#[derive(Debug)]
struct LineSnapshot {
    sku_id: Uuid,
    sku_code: String,
    product_name: String,
    quantity: i64,
    unit_price: Decimal,
    unit_cost: Decimal,
    total_price: Decimal,
}

impl StockMovementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Receive stock. Each line's unit cost may differ from the SKU's
    /// stored cost; when it does, the stored cost is updated to the latest
    /// value (last-cost-wins costing).
    pub async fn stock_in(
        &self,
        actor: &AuthUser,
        settings: &SystemSettings,
        input: StockInInput,
    ) -> AppResult<InventoryTransaction> {
        let draft = Draft {
            direction: TransactionDirection::In,
            source_type: Some(input.source_type),
            reason_category_id: input.reason_category_id,
            supplier_id: input.supplier_id,
            platform_id: None,
            reference_number: input.reference_number,
            customer_name: None,
            notes: input.notes,
            transaction_date: input
                .transaction_date
                .unwrap_or_else(|| Local::now().date_naive()),
            lines: input
                .line_items
                .into_iter()
                .map(|l| DraftLine {
                    sku_id: l.sku_id,
                    quantity: l.quantity,
                    unit_price: None,
                    unit_cost: Some(l.unit_cost),
                })
                .collect(),
        };

        self.record(actor, settings, draft).await
    }

    /// Sell or remove stock. The caller's unit price may differ from the
    /// SKU's stored price; the stored price is not updated (price changes
    /// go through the catalog edit path).
    pub async fn stock_out(
        &self,
        actor: &AuthUser,
        settings: &SystemSettings,
        input: StockOutInput,
    ) -> AppResult<InventoryTransaction> {
        let draft = Draft {
            direction: TransactionDirection::Out,
            source_type: None,
            reason_category_id: input.reason_category_id,
            supplier_id: None,
            platform_id: input.platform_id,
            reference_number: input.reference_number,
            customer_name: input.customer_name,
            notes: input.notes,
            transaction_date: input
                .transaction_date
                .unwrap_or_else(|| Local::now().date_naive()),
            lines: input
                .line_items
                .into_iter()
                .map(|l| DraftLine {
                    sku_id: l.sku_id,
                    quantity: l.quantity,
                    unit_price: Some(l.unit_price),
                    unit_cost: None,
                })
                .collect(),
        };

        self.record(actor, settings, draft).await
    }

    /// Record an adjustment. Stock arithmetic follows the reason
    /// category's direction; the oversell gate applies exactly as it does
    /// for Stock Out.
    pub async fn adjust(
        &self,
        actor: &AuthUser,
        settings: &SystemSettings,
        input: AdjustmentInput,
    ) -> AppResult<InventoryTransaction> {
        let draft = Draft {
            direction: TransactionDirection::Adjustment,
            source_type: None,
            reason_category_id: input.reason_category_id,
            supplier_id: None,
            platform_id: None,
            reference_number: None,
            customer_name: None,
            notes: input.notes,
            transaction_date: input
                .transaction_date
                .unwrap_or_else(|| Local::now().date_naive()),
            lines: input
                .line_items
                .into_iter()
                .map(|l| DraftLine {
                    sku_id: l.sku_id,
                    quantity: l.quantity,
                    unit_price: None,
                    unit_cost: None,
                })
                .collect(),
        };

        self.record(actor, settings, draft).await
    }

    /// Validate and apply one movement as a single atomic unit.
    async fn record(
        &self,
        actor: &AuthUser,
        settings: &SystemSettings,
        draft: Draft,
    ) -> AppResult<InventoryTransaction> {
        let mut tx = self.db.begin().await?;

        // 1. Reason category: selected, active, direction matches
        let reason = sqlx::query_as::<_, ReasonRow>(
            r#"
            SELECT direction, requires_platform, requires_supplier, is_active
            FROM reason_categories
            WHERE id = $1
            "#,
        )
        .bind(draft.reason_category_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "reason_category_id".to_string(),
            message: "Reason category not found".to_string(),
        })?;

        if !reason.is_active {
            return Err(AppError::Validation {
                field: "reason_category_id".to_string(),
                message: "Reason category is inactive".to_string(),
            });
        }

        let effective = match draft.direction {
            TransactionDirection::Adjustment => reason
                .direction
                .parse::<TransactionDirection>()
                .map_err(AppError::Internal)?,
            direction => {
                if reason.direction != direction.as_str() {
                    return Err(AppError::Validation {
                        field: "reason_category_id".to_string(),
                        message: format!(
                            "Reason category is for {} transactions, not {}",
                            reason.direction, direction
                        ),
                    });
                }
                direction
            }
        };
        if effective == TransactionDirection::Adjustment {
            return Err(AppError::Internal(
                "Reason category carries an invalid direction".to_string(),
            ));
        }

        // 2. Requirement flags. The reason's own flags are authoritative,
        // not whatever the submission claims about itself.
        if reason.requires_platform && draft.platform_id.is_none() {
            return Err(AppError::Validation {
                field: "platform_id".to_string(),
                message: "Selected reason requires a platform".to_string(),
            });
        }
        if reason.requires_supplier && draft.supplier_id.is_none() {
            return Err(AppError::Validation {
                field: "supplier_id".to_string(),
                message: "Selected reason requires a supplier".to_string(),
            });
        }

        let platform = match draft.platform_id {
            Some(platform_id) => {
                let platform = sqlx::query_as::<_, PlatformRow>(
                    "SELECT name, fee_percentage, is_active FROM platforms WHERE id = $1",
                )
                .bind(platform_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::Validation {
                    field: "platform_id".to_string(),
                    message: "Platform not found".to_string(),
                })?;
                if !platform.is_active {
                    return Err(AppError::Validation {
                        field: "platform_id".to_string(),
                        message: "Platform is inactive".to_string(),
                    });
                }
                Some(platform)
            }
            None => None,
        };

        if let Some(supplier_id) = draft.supplier_id {
            let active =
                sqlx::query_scalar::<_, bool>("SELECT is_active FROM suppliers WHERE id = $1")
                    .bind(supplier_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            match active {
                Some(true) => {}
                Some(false) => {
                    return Err(AppError::Validation {
                        field: "supplier_id".to_string(),
                        message: "Supplier is inactive".to_string(),
                    })
                }
                None => {
                    return Err(AppError::Validation {
                        field: "supplier_id".to_string(),
                        message: "Supplier not found".to_string(),
                    })
                }
            }
        }

        // 3. Line items: at least one, every SKU existing and active,
        // every quantity a positive integer
        if draft.lines.is_empty() {
            return Err(AppError::ValidationError(
                "At least one line item is required".to_string(),
            ));
        }

        // Lock SKU rows in a stable order so concurrent submissions
        // touching the same SKUs cannot deadlock
        let mut lock_order: Vec<Uuid> = draft.lines.iter().map(|l| l.sku_id).collect();
        lock_order.sort();
        lock_order.dedup();

        let mut skus: HashMap<Uuid, LockedSku> = HashMap::new();
        for sku_id in lock_order {
            let sku = sqlx::query_as::<_, LockedSku>(
                r#"
                SELECT s.id, s.sku_code, p.name AS product_name, s.price, s.cost,
                       s.stock, s.is_active
                FROM skus s
                JOIN products p ON p.id = s.product_id
                WHERE s.id = $1
                FOR UPDATE OF s
                "#,
            )
            .bind(sku_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Validation {
                field: "line_items".to_string(),
                message: format!("SKU {} not found", sku_id),
            })?;

            if !sku.is_active {
                return Err(AppError::Validation {
                    field: "line_items".to_string(),
                    message: format!("SKU {} is inactive", sku.sku_code),
                });
            }

            skus.insert(sku_id, sku);
        }

        for line in &draft.lines {
            validate_quantity(line.quantity).map_err(|msg| AppError::Validation {
                field: "line_items".to_string(),
                message: msg.to_string(),
            })?;
        }

        // 4. Oversell gate against the stock held by the locked rows.
        // Duplicate lines for one SKU accumulate against the same balance.
        if effective == TransactionDirection::Out && !settings.enable_negative_stock {
            let mut projected: HashMap<Uuid, i64> = HashMap::new();
            for line in &draft.lines {
                let sku = self.locked(&skus, line.sku_id)?;
                let remaining = projected.entry(line.sku_id).or_insert(sku.stock);
                if *remaining - line.quantity < 0 {
                    return Err(AppError::InsufficientStock(format!(
                        "Insufficient stock for {}: requested {}, available {}",
                        sku.sku_code, line.quantity, *remaining
                    )));
                }
                *remaining -= line.quantity;
            }
        }

        // 5. Numeric fields must be non-negative (Decimal is always finite)
        for line in &draft.lines {
            if let Some(price) = line.unit_price {
                validate_unit_amount(price).map_err(|msg| AppError::Validation {
                    field: "unit_price".to_string(),
                    message: msg.to_string(),
                })?;
            }
            if let Some(cost) = line.unit_cost {
                validate_unit_amount(cost).map_err(|msg| AppError::Validation {
                    field: "unit_cost".to_string(),
                    message: msg.to_string(),
                })?;
            }
        }

        // Freeze line snapshots and compute aggregates
        let mut snapshots: Vec<LineSnapshot> = Vec::with_capacity(draft.lines.len());
        let mut total_quantity: i64 = 0;
        let mut total_amount = Decimal::ZERO;

        for line in &draft.lines {
            let sku = self.locked(&skus, line.sku_id)?;
            let (unit_price, unit_cost, total_price) = if effective == TransactionDirection::In {
                let unit_cost = line.unit_cost.unwrap_or(sku.cost);
                (sku.price, unit_cost, line_total(line.quantity, unit_cost))
            } else {
                let unit_price = line.unit_price.unwrap_or(sku.price);
                (unit_price, sku.cost, line_total(line.quantity, unit_price))
            };

            total_quantity += line.quantity;
            total_amount += total_price;
            snapshots.push(LineSnapshot {
                sku_id: sku.id,
                sku_code: sku.sku_code.clone(),
                product_name: sku.product_name.clone(),
                quantity: line.quantity,
                unit_price,
                unit_cost,
                total_price,
            });
        }

        // Platform fee and net revenue apply to sales only
        let (fee, net) = if draft.direction == TransactionDirection::Out {
            let fee = platform
                .as_ref()
                .map(|p| platform_fee(total_amount, p.fee_percentage));
            let net = net_amount(total_amount, fee.unwrap_or(Decimal::ZERO));
            (fee, Some(net))
        } else {
            (None, None)
        };

        // 6. Append the ledger entry
        let transaction_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO inventory_transactions (
                direction, source_type, reason_category_id, supplier_id, platform_id,
                total_quantity, total_amount, platform_fee, net_amount,
                reference_number, customer_name, notes, transaction_date,
                created_by, created_by_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(draft.direction.as_str())
        .bind(draft.source_type.map(|s| s.as_str()))
        .bind(draft.reason_category_id)
        .bind(draft.supplier_id)
        .bind(draft.platform_id)
        .bind(total_quantity)
        .bind(total_amount)
        .bind(fee)
        .bind(net)
        .bind(&draft.reference_number)
        .bind(&draft.customer_name)
        .bind(&draft.notes)
        .bind(draft.transaction_date)
        .bind(actor.user_id)
        .bind(&actor.display_name)
        .fetch_one(&mut *tx)
        .await?;

        for (idx, snapshot) in snapshots.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO transaction_line_items (
                    transaction_id, line_no, sku_id, sku_code, product_name,
                    quantity, unit_price, unit_cost, total_price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(transaction_id)
            .bind(idx as i32 + 1)
            .bind(snapshot.sku_id)
            .bind(&snapshot.sku_code)
            .bind(&snapshot.product_name)
            .bind(snapshot.quantity)
            .bind(snapshot.unit_price)
            .bind(snapshot.unit_cost)
            .bind(snapshot.total_price)
            .execute(&mut *tx)
            .await?;
        }

        // 7. Apply the stock effect of every line in the same scope
        for snapshot in &snapshots {
            if effective == TransactionDirection::In {
                if draft.direction == TransactionDirection::In {
                    // Receiving writes the latest cost back to the SKU
                    sqlx::query(
                        "UPDATE skus SET stock = stock + $1, cost = $2, updated_at = NOW() WHERE id = $3",
                    )
                    .bind(snapshot.quantity)
                    .bind(snapshot.unit_cost)
                    .bind(snapshot.sku_id)
                    .execute(&mut *tx)
                    .await?;
                } else {
                    sqlx::query(
                        "UPDATE skus SET stock = stock + $1, updated_at = NOW() WHERE id = $2",
                    )
                    .bind(snapshot.quantity)
                    .bind(snapshot.sku_id)
                    .execute(&mut *tx)
                    .await?;
                }
            } else {
                sqlx::query(
                    "UPDATE skus SET stock = stock - $1, updated_at = NOW() WHERE id = $2",
                )
                .bind(snapshot.quantity)
                .bind(snapshot.sku_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            transaction_id = %transaction_id,
            direction = draft.direction.as_str(),
            total_quantity,
            %total_amount,
            "Stock movement committed"
        );

        // 8. Best-effort audit notification; never fails the committed
        // transaction
        let (action, details) = match draft.direction {
            TransactionDirection::In => (
                AuditAction::StockIn,
                format!(
                    "Stock In: {} items, Total Cost: {}{}",
                    total_quantity,
                    settings.format_currency(total_amount),
                    draft
                        .reference_number
                        .as_deref()
                        .map(|r| format!(", Ref: {}", r))
                        .unwrap_or_default()
                ),
            ),
            TransactionDirection::Out => (
                AuditAction::StockOut,
                format!(
                    "Stock Out: {} items, Revenue: {}{}{}",
                    total_quantity,
                    settings.format_currency(net.unwrap_or(total_amount)),
                    platform
                        .as_ref()
                        .map(|p| format!(", Platform: {}", p.name))
                        .unwrap_or_default(),
                    draft
                        .customer_name
                        .as_deref()
                        .map(|c| format!(", Customer: {}", c))
                        .unwrap_or_default()
                ),
            ),
            TransactionDirection::Adjustment => {
                let action = if effective == TransactionDirection::In {
                    AuditAction::StockIn
                } else {
                    AuditAction::StockOut
                };
                (
                    action,
                    format!(
                        "Adjustment ({}): {} items",
                        effective.as_str(),
                        total_quantity
                    ),
                )
            }
        };

        AuditService::new(self.db.clone())
            .record(
                actor,
                AuditEntry {
                    action,
                    collection: "inventory_transactions".to_string(),
                    document_id: transaction_id.to_string(),
                    details: Some(details),
                },
            )
            .await;

        LedgerService::new(self.db.clone()).get(transaction_id).await
    }

    fn locked<'a>(
        &self,
        skus: &'a HashMap<Uuid, LockedSku>,
        sku_id: Uuid,
    ) -> AppResult<&'a LockedSku> {
        skus.get(&sku_id)
            .ok_or_else(|| AppError::Internal(format!("SKU {} missing from lock set", sku_id)))
    }
}
