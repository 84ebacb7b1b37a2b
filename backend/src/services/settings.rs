//! System settings service
//!
//! The settings singleton is loaded once per request and threaded into the
//! stock engine and reporting layer as a read-only snapshot; only the
//! highest privilege role may change it.

use shared::SystemSettings;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SettingsRow {
    business_name: String,
    currency: String,
    currency_symbol: String,
    default_reorder_point: i64,
    enable_low_stock_alerts: bool,
    enable_negative_stock: bool,
    low_stock_threshold: i64,
}

impl From<SettingsRow> for SystemSettings {
    fn from(row: SettingsRow) -> Self {
        SystemSettings {
            business_name: row.business_name,
            currency: row.currency,
            currency_symbol: row.currency_symbol,
            default_reorder_point: row.default_reorder_point,
            enable_low_stock_alerts: row.enable_low_stock_alerts,
            enable_negative_stock: row.enable_negative_stock,
            low_stock_threshold: row.low_stock_threshold,
        }
    }
}

impl SettingsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load the settings singleton, falling back to defaults when the row
    /// has never been written.
    pub async fn get(&self) -> AppResult<SystemSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT business_name, currency, currency_symbol, default_reorder_point,
                   enable_low_stock_alerts, enable_negative_stock, low_stock_threshold
            FROM system_settings
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SystemSettings::from).unwrap_or_default())
    }

    /// Replace the settings singleton.
    pub async fn update(&self, input: SystemSettings) -> AppResult<SystemSettings> {
        if input.business_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "business_name".to_string(),
                message: "Business name must not be empty".to_string(),
            });
        }
        if input.default_reorder_point < 0 {
            return Err(AppError::Validation {
                field: "default_reorder_point".to_string(),
                message: "Default reorder point must not be negative".to_string(),
            });
        }
        if input.low_stock_threshold < 0 {
            return Err(AppError::Validation {
                field: "low_stock_threshold".to_string(),
                message: "Low stock threshold must not be negative".to_string(),
            });
        }

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO system_settings (
                id, business_name, currency, currency_symbol, default_reorder_point,
                enable_low_stock_alerts, enable_negative_stock, low_stock_threshold
            )
            VALUES (TRUE, $1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                business_name = EXCLUDED.business_name,
                currency = EXCLUDED.currency,
                currency_symbol = EXCLUDED.currency_symbol,
                default_reorder_point = EXCLUDED.default_reorder_point,
                enable_low_stock_alerts = EXCLUDED.enable_low_stock_alerts,
                enable_negative_stock = EXCLUDED.enable_negative_stock,
                low_stock_threshold = EXCLUDED.low_stock_threshold,
                updated_at = NOW()
            RETURNING business_name, currency, currency_symbol, default_reorder_point,
                      enable_low_stock_alerts, enable_negative_stock, low_stock_threshold
            "#,
        )
        .bind(&input.business_name)
        .bind(&input.currency)
        .bind(&input.currency_symbol)
        .bind(input.default_reorder_point)
        .bind(input.enable_low_stock_alerts)
        .bind(input.enable_negative_stock)
        .bind(input.low_stock_threshold)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
