//! Catalog service: products and their SKU variants
//!
//! The SKU is the unit of stock tracking. Its `stock` column is written by
//! the stock movement engine only; the edit path here never touches it
//! after the one-time initial value at creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{normalize_sku_code, validate_sku_code, validate_unit_amount, SystemSettings};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// A sellable item family
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// A stock-tracked variant
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sku {
    pub id: Uuid,
    pub product_id: Uuid,
    pub sku_code: String,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub price: Decimal,
    pub cost: Decimal,
    pub reorder_point: i64,
    pub stock: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// SKU joined with its product name for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkuWithProduct {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku_code: String,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub price: Decimal,
    pub cost: Decimal,
    pub reorder_point: i64,
    pub stock: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkuInput {
    pub product_id: Uuid,
    #[validate(length(min = 1, max = 64))]
    pub sku_code: String,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub price: Decimal,
    pub cost: Decimal,
    pub reorder_point: Option<i64>,
    /// One-time initial stock; immutable through the edit path afterwards
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkuInput {
    pub sku_code: Option<String>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub reorder_point: Option<i64>,
    pub is_active: Option<bool>,
}

impl CatalogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self, active_only: bool) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, category_id, color_id, size_id,
                   is_active, created_at, updated_at, created_by
            FROM products
            WHERE NOT $1 OR is_active
            ORDER BY name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, category_id, color_id, size_id,
                   is_active, created_at, updated_at, created_by
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    pub async fn create_product(
        &self,
        created_by: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        self.ensure_category_exists(input.category_id).await?;

        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, category_id, color_id, size_id, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, category_id, color_id, size_id,
                      is_active, created_at, updated_at, created_by
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.category_id)
        .bind(input.color_id)
        .bind(input.size_id)
        .bind(input.is_active.unwrap_or(true))
        .bind(created_by)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;

        if let Some(category_id) = input.category_id {
            if category_id != existing.category_id {
                self.ensure_category_exists(category_id).await?;
            }
        }

        let row = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, description = $2, category_id = $3, color_id = $4,
                size_id = $5, is_active = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING id, name, description, category_id, color_id, size_id,
                      is_active, created_at, updated_at, created_by
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.description.or(existing.description))
        .bind(input.category_id.unwrap_or(existing.category_id))
        .bind(input.color_id.or(existing.color_id))
        .bind(input.size_id.or(existing.size_id))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Delete a product. Forbidden while any SKU references it.
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let has_skus = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM skus WHERE product_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if has_skus {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "Product has SKUs. Delete SKUs first.".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // SKUs
    // ------------------------------------------------------------------

    pub async fn list_skus(&self, active_only: bool) -> AppResult<Vec<SkuWithProduct>> {
        let rows = sqlx::query_as::<_, SkuWithProduct>(
            r#"
            SELECT s.id, s.product_id, p.name AS product_name, s.sku_code,
                   s.size_id, s.color_id, s.price, s.cost, s.reorder_point,
                   s.stock, s.is_active, s.created_at, s.updated_at
            FROM skus s
            JOIN products p ON p.id = s.product_id
            WHERE NOT $1 OR s.is_active
            ORDER BY s.sku_code
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// SKUs for one product, sorted by code for presentation.
    pub async fn skus_for_product(&self, product_id: Uuid) -> AppResult<Vec<Sku>> {
        let rows = sqlx::query_as::<_, Sku>(
            r#"
            SELECT id, product_id, sku_code, size_id, color_id, price, cost,
                   reorder_point, stock, is_active, created_at, updated_at
            FROM skus
            WHERE product_id = $1
            ORDER BY sku_code
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn get_sku(&self, sku_id: Uuid) -> AppResult<Sku> {
        sqlx::query_as::<_, Sku>(
            r#"
            SELECT id, product_id, sku_code, size_id, color_id, price, cost,
                   reorder_point, stock, is_active, created_at, updated_at
            FROM skus
            WHERE id = $1
            "#,
        )
        .bind(sku_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("SKU".to_string()))
    }

    pub async fn create_sku(
        &self,
        settings: &SystemSettings,
        input: CreateSkuInput,
    ) -> AppResult<Sku> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        validate_sku_code(&input.sku_code).map_err(|msg| AppError::Validation {
            field: "sku_code".to_string(),
            message: msg.to_string(),
        })?;
        let sku_code = normalize_sku_code(&input.sku_code);

        validate_unit_amount(input.price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(input.cost).map_err(|msg| AppError::Validation {
            field: "cost".to_string(),
            message: msg.to_string(),
        })?;

        let stock = input.stock.unwrap_or(0);
        if stock < 0 {
            return Err(AppError::Validation {
                field: "stock".to_string(),
                message: "Initial stock must not be negative".to_string(),
            });
        }
        let reorder_point = input.reorder_point.unwrap_or(settings.default_reorder_point);
        if reorder_point < 0 {
            return Err(AppError::Validation {
                field: "reorder_point".to_string(),
                message: "Reorder point must not be negative".to_string(),
            });
        }

        // Product must exist before hanging a variant off it
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(input.product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        self.ensure_code_available(&sku_code, None).await?;

        let row = sqlx::query_as::<_, Sku>(
            r#"
            INSERT INTO skus (product_id, sku_code, size_id, color_id, price, cost,
                              reorder_point, stock, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, product_id, sku_code, size_id, color_id, price, cost,
                      reorder_point, stock, is_active, created_at, updated_at
            "#,
        )
        .bind(input.product_id)
        .bind(&sku_code)
        .bind(input.size_id)
        .bind(input.color_id)
        .bind(input.price)
        .bind(input.cost)
        .bind(reorder_point)
        .bind(stock)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Update a SKU. The stock column is deliberately absent from the
    /// UPDATE: stock changes go through Stock In/Out only.
    pub async fn update_sku(&self, sku_id: Uuid, input: UpdateSkuInput) -> AppResult<Sku> {
        let existing = self.get_sku(sku_id).await?;

        let sku_code = match &input.sku_code {
            Some(code) => {
                validate_sku_code(code).map_err(|msg| AppError::Validation {
                    field: "sku_code".to_string(),
                    message: msg.to_string(),
                })?;
                let code = normalize_sku_code(code);
                if code != existing.sku_code {
                    self.ensure_code_available(&code, Some(sku_id)).await?;
                }
                code
            }
            None => existing.sku_code,
        };

        let price = input.price.unwrap_or(existing.price);
        let cost = input.cost.unwrap_or(existing.cost);
        validate_unit_amount(price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(cost).map_err(|msg| AppError::Validation {
            field: "cost".to_string(),
            message: msg.to_string(),
        })?;

        let reorder_point = input.reorder_point.unwrap_or(existing.reorder_point);
        if reorder_point < 0 {
            return Err(AppError::Validation {
                field: "reorder_point".to_string(),
                message: "Reorder point must not be negative".to_string(),
            });
        }

        let row = sqlx::query_as::<_, Sku>(
            r#"
            UPDATE skus
            SET sku_code = $1, size_id = $2, color_id = $3, price = $4, cost = $5,
                reorder_point = $6, is_active = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING id, product_id, sku_code, size_id, color_id, price, cost,
                      reorder_point, stock, is_active, created_at, updated_at
            "#,
        )
        .bind(&sku_code)
        .bind(input.size_id.or(existing.size_id))
        .bind(input.color_id.or(existing.color_id))
        .bind(price)
        .bind(cost)
        .bind(reorder_point)
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(sku_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Delete a SKU. Ledger history stays readable because line items
    /// carry their own code and product-name snapshots.
    pub async fn delete_sku(&self, sku_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM skus WHERE id = $1")
            .bind(sku_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("SKU".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Case-insensitive uniqueness check for a SKU code, excluding the SKU
    /// being edited. The unique index on LOWER(sku_code) backs this up
    /// under concurrent writers.
    async fn ensure_code_available(&self, code: &str, exclude: Option<Uuid>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM skus
                WHERE LOWER(sku_code) = LOWER($1)
                  AND ($2::UUID IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::DuplicateEntry("SKU code".to_string()));
        }

        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::Validation {
                field: "category_id".to_string(),
                message: "Category not found".to_string(),
            });
        }

        Ok(())
    }
}
