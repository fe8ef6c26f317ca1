//! In-memory audit log store.

use super::store::AuditLogStore;
use crate::db::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use coursehub_audit_types::{AuditEntryId, AuditLogEntry, NewAuditEntry};
use parking_lot::Mutex;

/// Process-local audit log.
///
/// Timestamps are strictly increasing per store, even when the wall clock
/// stalls or steps backwards.
#[derive(Default)]
pub struct MemoryAuditLogStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<AuditLogEntry>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryAuditLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding previously written entries.
    pub fn from_entries(entries: Vec<AuditLogEntry>) -> Self {
        let last_timestamp = entries.iter().map(|e| e.timestamp).max();
        Self {
            inner: Mutex::new(Inner {
                entries,
                last_timestamp,
            }),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn append(&self, entry: NewAuditEntry) -> StoreResult<AuditLogEntry> {
        let mut inner = self.inner.lock();

        let now = Utc::now();
        let timestamp = match inner.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_timestamp = Some(timestamp);

        let entry = entry.into_entry(AuditEntryId::new(), timestamp);
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_by_actor(
        &self,
        actor_uid: &str,
        limit: usize,
    ) -> StoreResult<Vec<AuditLogEntry>> {
        let inner = self.inner.lock();
        let mut entries: Vec<AuditLogEntry> = inner
            .entries
            .iter()
            .filter(|e| e.actor_uid == actor_uid)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_audit_types::AuditAction;

    #[tokio::test]
    async fn test_append_assigns_increasing_timestamps() {
        let store = MemoryAuditLogStore::new();
        let mut previous = None;
        for _ in 0..100 {
            let entry = store
                .append(NewAuditEntry::new("u1", AuditAction::CourseUpdated))
                .await
                .unwrap();
            if let Some(prev) = previous {
                assert!(entry.timestamp > prev);
            }
            previous = Some(entry.timestamp);
        }
        assert_eq!(store.len(), 100);
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        let store = MemoryAuditLogStore::new();
        let a = store
            .append(NewAuditEntry::new("u1", AuditAction::CourseCreated))
            .await
            .unwrap();
        let b = store
            .append(NewAuditEntry::new("u1", AuditAction::CourseCreated))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_by_actor_filters_and_orders() {
        let store = MemoryAuditLogStore::new();
        for i in 0..5 {
            store
                .append(NewAuditEntry::new("u1", AuditAction::CourseCreated).detail("n", i))
                .await
                .unwrap();
            store
                .append(NewAuditEntry::new("u2", AuditAction::CourseDeleted))
                .await
                .unwrap();
        }

        let entries = store.list_by_actor("u1", 3).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.actor_uid == "u1"));
        assert_eq!(entries[0].details["n"], 4);
        assert_eq!(entries[2].details["n"], 2);
    }

    #[tokio::test]
    async fn test_timestamps_continue_after_imported_history() {
        let future = Utc::now() + Duration::hours(1);
        let imported = NewAuditEntry::new("u1", AuditAction::CourseCreated)
            .into_entry(AuditEntryId::new(), future);
        let store = MemoryAuditLogStore::from_entries(vec![imported]);

        let entry = store
            .append(NewAuditEntry::new("u1", AuditAction::CourseUpdated))
            .await
            .unwrap();
        assert!(entry.timestamp > future);
    }
}
