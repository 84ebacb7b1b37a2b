//! HTTP handlers for stock movements

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::InventoryTransaction;
use crate::services::stock::{AdjustmentInput, StockInInput, StockMovementService, StockOutInput};
use crate::services::SettingsService;
use crate::AppState;

/// Submit a Stock In (receiving) transaction
pub async fn stock_in(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<StockInInput>,
) -> AppResult<Json<InventoryTransaction>> {
    let settings = SettingsService::new(state.db.clone()).get().await?;
    let service = StockMovementService::new(state.db);
    let transaction = service
        .stock_in(&current_user.0, &settings, input)
        .await?;
    Ok(Json(transaction))
}

/// Submit a Stock Out (sale/removal) transaction
pub async fn stock_out(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<StockOutInput>,
) -> AppResult<Json<InventoryTransaction>> {
    let settings = SettingsService::new(state.db.clone()).get().await?;
    let service = StockMovementService::new(state.db);
    let transaction = service
        .stock_out(&current_user.0, &settings, input)
        .await?;
    Ok(Json(transaction))
}

/// Submit a stock adjustment; direction follows the reason category
pub async fn record_adjustment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<AdjustmentInput>,
) -> AppResult<Json<InventoryTransaction>> {
    let settings = SettingsService::new(state.db.clone()).get().await?;
    let service = StockMovementService::new(state.db);
    let transaction = service.adjust(&current_user.0, &settings, input).await?;
    Ok(Json(transaction))
}
