//! HTTP handlers for reference data CRUD
//!
//! Uniform create/update/delete/list endpoints for the selection-list
//! entities. No special logic lives here; the stock engine reads these
//! records for validation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::TransactionDirection;
use uuid::Uuid;

use super::catalog::ListQuery;
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reference::{
    Category, Color, CreateCategoryInput, CreateColorInput, CreatePlatformInput,
    CreateReasonCategoryInput, CreateSizeInput, CreateSupplierInput, Platform, ReasonCategory,
    ReferenceDataService, Size, Supplier, UpdateCategoryInput, UpdateColorInput,
    UpdatePlatformInput, UpdateReasonCategoryInput, UpdateSizeInput, UpdateSupplierInput,
};
use crate::AppState;

// ----------------------------------------------------------------------
// Categories
// ----------------------------------------------------------------------

pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.list_categories(query.active_only()).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<Json<Category>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_category(input).await?))
}

pub async fn update_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<Json<Category>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_category(category_id, input).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_category(category_id).await?;
    Ok(Json(()))
}

// ----------------------------------------------------------------------
// Colors
// ----------------------------------------------------------------------

pub async fn list_colors(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Color>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.list_colors(query.active_only()).await?))
}

pub async fn create_color(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateColorInput>,
) -> AppResult<Json<Color>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_color(input).await?))
}

pub async fn update_color(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(color_id): Path<Uuid>,
    Json(input): Json<UpdateColorInput>,
) -> AppResult<Json<Color>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_color(color_id, input).await?))
}

pub async fn delete_color(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(color_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_color(color_id).await?;
    Ok(Json(()))
}

// ----------------------------------------------------------------------
// Sizes
// ----------------------------------------------------------------------

pub async fn list_sizes(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Size>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.list_sizes(query.active_only()).await?))
}

pub async fn create_size(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateSizeInput>,
) -> AppResult<Json<Size>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_size(input).await?))
}

pub async fn update_size(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(size_id): Path<Uuid>,
    Json(input): Json<UpdateSizeInput>,
) -> AppResult<Json<Size>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_size(size_id, input).await?))
}

pub async fn delete_size(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(size_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_size(size_id).await?;
    Ok(Json(()))
}

// ----------------------------------------------------------------------
// Suppliers
// ----------------------------------------------------------------------

pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.list_suppliers(query.active_only()).await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_supplier(input).await?))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_supplier(supplier_id, input).await?))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_supplier(supplier_id).await?;
    Ok(Json(()))
}

// ----------------------------------------------------------------------
// Platforms
// ----------------------------------------------------------------------

pub async fn list_platforms(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Platform>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.list_platforms(query.active_only()).await?))
}

pub async fn create_platform(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreatePlatformInput>,
) -> AppResult<Json<Platform>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_platform(input).await?))
}

pub async fn update_platform(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(platform_id): Path<Uuid>,
    Json(input): Json<UpdatePlatformInput>,
) -> AppResult<Json<Platform>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_platform(platform_id, input).await?))
}

pub async fn delete_platform(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(platform_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_platform(platform_id).await?;
    Ok(Json(()))
}

// ----------------------------------------------------------------------
// Reason categories
// ----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ReasonListQuery {
    pub active_only: Option<bool>,
    pub direction: Option<TransactionDirection>,
}

pub async fn list_reason_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ReasonListQuery>,
) -> AppResult<Json<Vec<ReasonCategory>>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(
        service
            .list_reason_categories(query.active_only.unwrap_or(false), query.direction)
            .await?,
    ))
}

pub async fn create_reason_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateReasonCategoryInput>,
) -> AppResult<Json<ReasonCategory>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.create_reason_category(input).await?))
}

pub async fn update_reason_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(reason_id): Path<Uuid>,
    Json(input): Json<UpdateReasonCategoryInput>,
) -> AppResult<Json<ReasonCategory>> {
    let service = ReferenceDataService::new(state.db);
    Ok(Json(service.update_reason_category(reason_id, input).await?))
}

pub async fn delete_reason_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(reason_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ReferenceDataService::new(state.db);
    service.delete_reason_category(reason_id).await?;
    Ok(Json(()))
}
