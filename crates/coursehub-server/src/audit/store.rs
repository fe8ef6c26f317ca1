//! Audit log store trait.

use crate::db::StoreResult;
use async_trait::async_trait;
use coursehub_audit_types::{AuditLogEntry, NewAuditEntry};

/// Backend holding audit log entries.
///
/// Entries are append-only: never updated or deleted once written.
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Persist a new entry, assigning its id and timestamp.
    async fn append(&self, entry: NewAuditEntry) -> StoreResult<AuditLogEntry>;

    /// Entries written by `actor_uid`, newest first, at most `limit`.
    async fn list_by_actor(&self, actor_uid: &str, limit: usize)
        -> StoreResult<Vec<AuditLogEntry>>;
}
