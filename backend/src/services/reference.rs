//! Reference data service
//!
//! Uniform CRUD over the selection-list entities: categories, colors,
//! sizes, suppliers, platforms, and reason categories. These are
//! read-mostly; the stock engine only ever reads them for validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_fee_percentage, TransactionDirection};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ReferenceDataService {
    db: PgPool,
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Colors
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub hex_code: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateColorInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 4, max = 9))]
    pub hex_code: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateColorInput {
    pub name: Option<String>,
    pub hex_code: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Sizes
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Size {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSizeInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSizeInput {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Suppliers
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub contact_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Platforms
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub fee_percentage: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlatformInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub fee_percentage: Decimal,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlatformInput {
    pub name: Option<String>,
    pub fee_percentage: Option<Decimal>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Reason categories
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReasonCategory {
    pub id: Uuid,
    pub name: String,
    pub direction: String,
    pub requires_platform: bool,
    pub requires_supplier: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReasonCategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// IN or OUT; fixed at creation
    pub direction: TransactionDirection,
    pub requires_platform: Option<bool>,
    pub requires_supplier: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReasonCategoryInput {
    pub name: Option<String>,
    pub requires_platform: Option<bool>,
    pub requires_supplier: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl ReferenceDataService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self, active_only: bool) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, sort_order, is_active, created_at, updated_at
            FROM categories
            WHERE NOT $1 OR is_active
            ORDER BY sort_order, name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<Category> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, sort_order, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.sort_order.unwrap_or(0))
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> AppResult<Category> {
        let existing = sqlx::query_as::<_, Category>(
            "SELECT id, name, sort_order, is_active, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        let row = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, sort_order = $2, is_active = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.sort_order.unwrap_or(existing.sort_order))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict {
                resource: "category".to_string(),
                message: "Category is referenced by products and cannot be deleted".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Colors
    // ------------------------------------------------------------------

    pub async fn list_colors(&self, active_only: bool) -> AppResult<Vec<Color>> {
        let rows = sqlx::query_as::<_, Color>(
            r#"
            SELECT id, name, hex_code, sort_order, is_active, created_at, updated_at
            FROM colors
            WHERE NOT $1 OR is_active
            ORDER BY sort_order, name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_color(&self, input: CreateColorInput) -> AppResult<Color> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, Color>(
            r#"
            INSERT INTO colors (name, hex_code, sort_order, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, hex_code, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.hex_code)
        .bind(input.sort_order.unwrap_or(0))
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_color(&self, color_id: Uuid, input: UpdateColorInput) -> AppResult<Color> {
        let existing = sqlx::query_as::<_, Color>(
            "SELECT id, name, hex_code, sort_order, is_active, created_at, updated_at FROM colors WHERE id = $1",
        )
        .bind(color_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Color".to_string()))?;

        let row = sqlx::query_as::<_, Color>(
            r#"
            UPDATE colors
            SET name = $1, hex_code = $2, sort_order = $3, is_active = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, hex_code, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.hex_code.unwrap_or(existing.hex_code))
        .bind(input.sort_order.unwrap_or(existing.sort_order))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(color_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_color(&self, color_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM products WHERE color_id = $1)
                OR EXISTS(SELECT 1 FROM skus WHERE color_id = $1)
            "#,
        )
        .bind(color_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict {
                resource: "color".to_string(),
                message: "Color is referenced by products or SKUs and cannot be deleted"
                    .to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM colors WHERE id = $1")
            .bind(color_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Color".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Sizes
    // ------------------------------------------------------------------

    pub async fn list_sizes(&self, active_only: bool) -> AppResult<Vec<Size>> {
        let rows = sqlx::query_as::<_, Size>(
            r#"
            SELECT id, name, sort_order, is_active, created_at, updated_at
            FROM sizes
            WHERE NOT $1 OR is_active
            ORDER BY sort_order, name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_size(&self, input: CreateSizeInput) -> AppResult<Size> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, Size>(
            r#"
            INSERT INTO sizes (name, sort_order, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.sort_order.unwrap_or(0))
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_size(&self, size_id: Uuid, input: UpdateSizeInput) -> AppResult<Size> {
        let existing = sqlx::query_as::<_, Size>(
            "SELECT id, name, sort_order, is_active, created_at, updated_at FROM sizes WHERE id = $1",
        )
        .bind(size_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Size".to_string()))?;

        let row = sqlx::query_as::<_, Size>(
            r#"
            UPDATE sizes
            SET name = $1, sort_order = $2, is_active = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.sort_order.unwrap_or(existing.sort_order))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(size_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_size(&self, size_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM products WHERE size_id = $1)
                OR EXISTS(SELECT 1 FROM skus WHERE size_id = $1)
            "#,
        )
        .bind(size_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict {
                resource: "size".to_string(),
                message: "Size is referenced by products or SKUs and cannot be deleted"
                    .to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM sizes WHERE id = $1")
            .bind(size_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Size".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Suppliers
    // ------------------------------------------------------------------

    pub async fn list_suppliers(&self, active_only: bool) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_name, email, phone, address, notes,
                   is_active, created_at, updated_at
            FROM suppliers
            WHERE NOT $1 OR is_active
            ORDER BY name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_name, email, phone, address, notes, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, contact_name, email, phone, address, notes,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.notes)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        let existing = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_name, email, phone, address, notes,
                   is_active, created_at, updated_at
            FROM suppliers
            WHERE id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        let row = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, contact_name = $2, email = $3, phone = $4, address = $5,
                notes = $6, is_active = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING id, name, contact_name, email, phone, address, notes,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.contact_name.or(existing.contact_name))
        .bind(input.email.or(existing.email))
        .bind(input.phone.or(existing.phone))
        .bind(input.address.or(existing.address))
        .bind(input.notes.or(existing.notes))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_supplier(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Platforms
    // ------------------------------------------------------------------

    pub async fn list_platforms(&self, active_only: bool) -> AppResult<Vec<Platform>> {
        let rows = sqlx::query_as::<_, Platform>(
            r#"
            SELECT id, name, fee_percentage, is_active, created_at, updated_at
            FROM platforms
            WHERE NOT $1 OR is_active
            ORDER BY name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_platform(&self, input: CreatePlatformInput) -> AppResult<Platform> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validate_fee_percentage(input.fee_percentage).map_err(|msg| AppError::Validation {
            field: "fee_percentage".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, Platform>(
            r#"
            INSERT INTO platforms (name, fee_percentage, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, fee_percentage, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.fee_percentage)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_platform(
        &self,
        platform_id: Uuid,
        input: UpdatePlatformInput,
    ) -> AppResult<Platform> {
        let existing = sqlx::query_as::<_, Platform>(
            "SELECT id, name, fee_percentage, is_active, created_at, updated_at FROM platforms WHERE id = $1",
        )
        .bind(platform_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Platform".to_string()))?;

        let fee_percentage = input.fee_percentage.unwrap_or(existing.fee_percentage);
        validate_fee_percentage(fee_percentage).map_err(|msg| AppError::Validation {
            field: "fee_percentage".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, Platform>(
            r#"
            UPDATE platforms
            SET name = $1, fee_percentage = $2, is_active = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, fee_percentage, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(fee_percentage)
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(platform_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_platform(&self, platform_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM platforms WHERE id = $1")
            .bind(platform_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Platform".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Reason categories
    // ------------------------------------------------------------------

    pub async fn list_reason_categories(
        &self,
        active_only: bool,
        direction: Option<TransactionDirection>,
    ) -> AppResult<Vec<ReasonCategory>> {
        let rows = sqlx::query_as::<_, ReasonCategory>(
            r#"
            SELECT id, name, direction, requires_platform, requires_supplier,
                   sort_order, is_active, created_at, updated_at
            FROM reason_categories
            WHERE (NOT $1 OR is_active)
              AND ($2::TEXT IS NULL OR direction = $2)
            ORDER BY sort_order, name
            "#,
        )
        .bind(active_only)
        .bind(direction.map(|d| d.as_str()))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_reason_category(
        &self,
        input: CreateReasonCategoryInput,
    ) -> AppResult<ReasonCategory> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        // A reason pins one direction; ADJUSTMENT transactions borrow the
        // reason's IN or OUT for their arithmetic.
        if input.direction == TransactionDirection::Adjustment {
            return Err(AppError::Validation {
                field: "direction".to_string(),
                message: "Reason direction must be IN or OUT".to_string(),
            });
        }

        let row = sqlx::query_as::<_, ReasonCategory>(
            r#"
            INSERT INTO reason_categories (name, direction, requires_platform, requires_supplier, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, direction, requires_platform, requires_supplier,
                      sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.direction.as_str())
        .bind(input.requires_platform.unwrap_or(false))
        .bind(input.requires_supplier.unwrap_or(false))
        .bind(input.sort_order.unwrap_or(0))
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update_reason_category(
        &self,
        reason_id: Uuid,
        input: UpdateReasonCategoryInput,
    ) -> AppResult<ReasonCategory> {
        let existing = sqlx::query_as::<_, ReasonCategory>(
            r#"
            SELECT id, name, direction, requires_platform, requires_supplier,
                   sort_order, is_active, created_at, updated_at
            FROM reason_categories
            WHERE id = $1
            "#,
        )
        .bind(reason_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Reason category".to_string()))?;

        let row = sqlx::query_as::<_, ReasonCategory>(
            r#"
            UPDATE reason_categories
            SET name = $1, requires_platform = $2, requires_supplier = $3,
                sort_order = $4, is_active = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, direction, requires_platform, requires_supplier,
                      sort_order, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.requires_platform.unwrap_or(existing.requires_platform))
        .bind(input.requires_supplier.unwrap_or(existing.requires_supplier))
        .bind(input.sort_order.unwrap_or(existing.sort_order))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(reason_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn delete_reason_category(&self, reason_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reason_categories WHERE id = $1")
            .bind(reason_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reason category".to_string()));
        }

        Ok(())
    }
}
