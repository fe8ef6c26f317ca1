//! Audit recorder: the write and read paths used by route handlers.

use super::store::AuditLogStore;
use crate::db::StoreResult;
use crate::middleware::logging::redact_json;
use coursehub_audit_types::{AuditAction, AuditLogEntry, NewAuditEntry};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Upper bound on entries returned by [`AuditRecorder::list_mine`].
pub const MAX_LIST_LIMIT: usize = 50;

/// Records privileged actions and reads back an actor's own history.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditLogStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Append one entry for `actor_uid`. Sensitive payload fields are
    /// redacted before they reach the store.
    pub async fn record(
        &self,
        actor_uid: &str,
        action: AuditAction,
        mut payload: serde_json::Value,
    ) -> StoreResult<AuditLogEntry> {
        redact_json(&mut payload);
        let entry = NewAuditEntry::new(actor_uid, action).with_payload(payload);

        match self.store.append(entry).await {
            Ok(entry) => {
                info!(
                    event = "audit_recorded",
                    audit_id = %entry.id,
                    actor_uid = %entry.actor_uid,
                    action = %entry.action,
                    "Audit entry recorded"
                );
                Ok(entry)
            }
            Err(err) => {
                error!(
                    event = "audit_write_failed",
                    actor_uid = %actor_uid,
                    action = %action,
                    error = %err,
                    "Audit entry could not be written"
                );
                Err(err)
            }
        }
    }

    /// Entries written by `actor_uid`, newest first, at most
    /// `min(limit, MAX_LIST_LIMIT)`.
    ///
    /// Never returns another actor's entries, whatever the store hands back.
    pub async fn list_mine(
        &self,
        actor_uid: &str,
        limit: usize,
    ) -> StoreResult<Vec<AuditLogEntry>> {
        let limit = limit.min(MAX_LIST_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut entries = self.store.list_by_actor(actor_uid, limit).await?;

        let fetched = entries.len();
        entries.retain(|e| e.actor_uid == actor_uid);
        if entries.len() != fetched {
            warn!(
                actor_uid = %actor_uid,
                dropped = fetched - entries.len(),
                "Audit store returned entries for another actor"
            );
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }
}
