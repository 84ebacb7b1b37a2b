//! HTTP handlers for audit log access

use axum::{
    extract::{Query, State},
    Json,
};
use shared::Pagination;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::audit::{AuditLogRecord, AuditService};
use crate::AppState;

/// List audit records, newest first (highest privilege role only)
pub async fn list_audit_logs(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<AuditLogRecord>>> {
    if !current_user.0.role.is_superadmin() {
        return Err(AppError::InsufficientPermissions);
    }

    let service = AuditService::new(state.db);
    let records = service.list(&pagination).await?;
    Ok(Json(records))
}
