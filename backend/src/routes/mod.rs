//! Route definitions for the Inventory Management Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - catalog
        .nest("/products", product_routes())
        .nest("/skus", sku_routes())
        // Protected routes - stock movements
        .nest("/stock", stock_routes())
        // Protected routes - transaction ledger
        .nest("/transactions", transaction_routes())
        // Protected routes - reports
        .nest("/reports", report_routes())
        // Protected routes - reference data
        .nest("/categories", category_routes())
        .nest("/colors", color_routes())
        .nest("/sizes", size_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/platforms", platform_routes())
        .nest("/reasons", reason_routes())
        // Protected routes - settings and audit
        .nest("/settings", settings_routes())
        .nest("/audit-logs", audit_routes())
}

/// Product management routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/skus", get(handlers::list_product_skus))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// SKU management routes (protected)
fn sku_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_skus).post(handlers::create_sku))
        .route(
            "/:sku_id",
            get(handlers::get_sku)
                .put(handlers::update_sku)
                .delete(handlers::delete_sku),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/in", post(handlers::stock_in))
        .route("/out", post(handlers::stock_out))
        .route("/adjustments", post(handlers::record_adjustment))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Transaction ledger routes (protected, read-only)
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_transactions))
        .route("/recent", get(handlers::recent_transactions))
        .route("/:transaction_id", get(handlers::get_transaction))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/low-stock", get(handlers::get_low_stock_alerts))
        .route("/inventory", get(handlers::get_inventory_report))
        .route(
            "/category-breakdown",
            get(handlers::get_category_breakdown),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category reference routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Color reference routes (protected)
fn color_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_colors).post(handlers::create_color))
        .route(
            "/:color_id",
            put(handlers::update_color).delete(handlers::delete_color),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Size reference routes (protected)
fn size_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sizes).post(handlers::create_size))
        .route(
            "/:size_id",
            put(handlers::update_size).delete(handlers::delete_size),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier reference routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            put(handlers::update_supplier).delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Platform reference routes (protected)
fn platform_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_platforms).post(handlers::create_platform),
        )
        .route(
            "/:platform_id",
            put(handlers::update_platform).delete(handlers::delete_platform),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reason category routes (protected)
fn reason_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_reason_categories).post(handlers::create_reason_category),
        )
        .route(
            "/:reason_id",
            put(handlers::update_reason_category)
                .delete(handlers::delete_reason_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Settings routes (protected; writes gated to the highest role)
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Audit log routes (protected; highest role only)
fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_audit_logs))
        .route_layer(middleware::from_fn(auth_middleware))
}
