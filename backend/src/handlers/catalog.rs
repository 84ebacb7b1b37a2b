//! HTTP handlers for catalog management (products and SKUs)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::catalog::{
    CatalogService, CreateProductInput, CreateSkuInput, Product, Sku, SkuWithProduct,
    UpdateProductInput, UpdateSkuInput,
};
use crate::services::SettingsService;
use crate::AppState;

/// Common listing filter
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub active_only: Option<bool>,
}

impl ListQuery {
    pub fn active_only(&self) -> bool {
        self.active_only.unwrap_or(false)
    }
}

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db);
    let products = service.list_products(query.active_only()).await?;
    Ok(Json(products))
}

/// Get a product
pub async fn get_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db);
    let product = service
        .create_product(current_user.0.user_id, input)
        .await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product (rejected while SKUs reference it)
pub async fn delete_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(Json(()))
}

/// List the SKUs of one product
pub async fn list_product_skus(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<Sku>>> {
    let service = CatalogService::new(state.db);
    let skus = service.skus_for_product(product_id).await?;
    Ok(Json(skus))
}

/// List SKUs
pub async fn list_skus(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<SkuWithProduct>>> {
    let service = CatalogService::new(state.db);
    let skus = service.list_skus(query.active_only()).await?;
    Ok(Json(skus))
}

/// Get a SKU
pub async fn get_sku(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(sku_id): Path<Uuid>,
) -> AppResult<Json<Sku>> {
    let service = CatalogService::new(state.db);
    let sku = service.get_sku(sku_id).await?;
    Ok(Json(sku))
}

/// Create a SKU. The initial stock value is set here once; afterwards
/// stock moves only through Stock In/Out.
pub async fn create_sku(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateSkuInput>,
) -> AppResult<Json<Sku>> {
    let settings = SettingsService::new(state.db.clone()).get().await?;
    let service = CatalogService::new(state.db);
    let sku = service.create_sku(&settings, input).await?;
    Ok(Json(sku))
}

/// Update a SKU (stock is not editable here)
pub async fn update_sku(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(sku_id): Path<Uuid>,
    Json(input): Json<UpdateSkuInput>,
) -> AppResult<Json<Sku>> {
    let service = CatalogService::new(state.db);
    let sku = service.update_sku(sku_id, input).await?;
    Ok(Json(sku))
}

/// Delete a SKU
pub async fn delete_sku(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(sku_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_sku(sku_id).await?;
    Ok(Json(()))
}
