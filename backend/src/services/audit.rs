//! Best-effort audit sink
//!
//! Audit entries are written after the primary transaction commits. A
//! failed write is logged and dropped; it must never fail or roll back the
//! committed transaction.

use chrono::{DateTime, Utc};
use shared::{AuditAction, Pagination};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::AuthUser;

#[derive(Clone)]
pub struct AuditService {
    db: PgPool,
}

/// One audit entry to record
#[derive(Debug)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub collection: String,
    pub document_id: String,
    pub details: Option<String>,
}

/// Persisted audit record
#[derive(Debug, Clone, serde::Serialize, FromRow)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub action: String,
    pub collection: String,
    pub document_id: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record an audit entry. Failures are logged and swallowed.
    pub async fn record(&self, actor: &AuthUser, entry: AuditEntry) {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_logs (action, collection, document_id, user_id, user_name, user_email, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.action.as_str())
        .bind(&entry.collection)
        .bind(&entry.document_id)
        .bind(actor.user_id)
        .bind(&actor.display_name)
        .bind(&actor.email)
        .bind(&entry.details)
        .execute(&self.db)
        .await;

        if let Err(e) = result {
            tracing::warn!(
                action = entry.action.as_str(),
                document_id = %entry.document_id,
                "Failed to write audit log: {}",
                e
            );
        }
    }

    /// List audit records, newest first.
    pub async fn list(&self, pagination: &Pagination) -> AppResult<Vec<AuditLogRecord>> {
        let records = sqlx::query_as::<_, AuditLogRecord>(
            r#"
            SELECT id, action, collection, document_id, user_id, user_name, user_email,
                   details, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}
