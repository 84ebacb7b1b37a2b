//! HTTP handlers for the transaction ledger (read-only)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{InventoryTransaction, LedgerService, TransactionFilter};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// List transactions by inclusive date range and optional filters
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<Vec<InventoryTransaction>>> {
    let service = LedgerService::new(state.db);
    let transactions = service.query(&filter).await?;
    Ok(Json(transactions))
}

/// Most recent transactions
pub async fn recent_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<InventoryTransaction>>> {
    let service = LedgerService::new(state.db);
    let transactions = service.recent(query.limit.unwrap_or(10)).await?;
    Ok(Json(transactions))
}

/// Get one transaction with its line items
pub async fn get_transaction(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<InventoryTransaction>> {
    let service = LedgerService::new(state.db);
    let transaction = service.get(transaction_id).await?;
    Ok(Json(transaction))
}
