//! Postgres-backed audit log store.

use super::store::AuditLogStore;
use crate::db::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coursehub_audit_types::{AuditDetails, AuditEntryId, AuditLogEntry, NewAuditEntry};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

/// Audit log persisted in the `audit_logs` table.
///
/// The database assigns the timestamp; `seq` breaks ties between entries
/// written within the same microsecond.
pub struct PgAuditLogStore {
    pool: PgPool,
}

impl PgAuditLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuditLogRow {
    id: Uuid,
    actor_uid: String,
    action: String,
    timestamp: DateTime<Utc>,
    details: Json<AuditDetails>,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        AuditLogEntry {
            id: AuditEntryId::from_uuid(row.id),
            actor_uid: row.actor_uid,
            action: row.action,
            timestamp: row.timestamp,
            details: row.details.0,
        }
    }
}

#[async_trait]
impl AuditLogStore for PgAuditLogStore {
    async fn append(&self, entry: NewAuditEntry) -> StoreResult<AuditLogEntry> {
        let row: AuditLogRow = sqlx::query_as(
            r#"
            INSERT INTO audit_logs (id, actor_uid, action, details)
            VALUES ($1, $2, $3, $4)
            RETURNING id, actor_uid, action, timestamp, details
            "#,
        )
        .bind(AuditEntryId::new().as_uuid())
        .bind(&entry.actor_uid)
        .bind(&entry.action)
        .bind(Json(&entry.details))
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %row.id, action = %row.action, "Audit row inserted");
        Ok(row.into())
    }

    async fn list_by_actor(
        &self,
        actor_uid: &str,
        limit: usize,
    ) -> StoreResult<Vec<AuditLogEntry>> {
        let rows: Vec<AuditLogRow> = sqlx::query_as(
            r#"
            SELECT id, actor_uid, action, timestamp, details
            FROM audit_logs
            WHERE actor_uid = $1
            ORDER BY timestamp DESC, seq DESC
            LIMIT $2
            "#,
        )
        .bind(actor_uid)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}
