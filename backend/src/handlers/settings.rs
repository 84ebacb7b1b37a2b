//! HTTP handlers for system settings

use axum::{extract::State, Json};
use shared::{AuditAction, SystemSettings};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::audit::AuditEntry;
use crate::services::{AuditService, SettingsService};
use crate::AppState;

/// Get the settings singleton
pub async fn get_settings(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<SystemSettings>> {
    let service = SettingsService::new(state.db);
    let settings = service.get().await?;
    Ok(Json(settings))
}

/// Replace the settings singleton (highest privilege role only)
pub async fn update_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SystemSettings>,
) -> AppResult<Json<SystemSettings>> {
    if !current_user.0.role.is_superadmin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = SettingsService::new(state.db.clone());
    let settings = service.update(input).await?;

    AuditService::new(state.db)
        .record(
            &current_user.0,
            AuditEntry {
                action: AuditAction::Update,
                collection: "settings".to_string(),
                document_id: "system".to_string(),
                details: Some("System settings updated".to_string()),
            },
        )
        .await;

    Ok(Json(settings))
}
