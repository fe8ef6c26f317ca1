//! Audit log entries.

use crate::{AuditAction, AuditEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action-specific fields carried by an entry.
pub type AuditDetails = serde_json::Map<String, serde_json::Value>;

/// Keys owned by the entry itself; details may not shadow them.
const RESERVED_KEYS: [&str; 4] = ["id", "actorUid", "action", "timestamp"];

/// A persisted, immutable audit log entry.
///
/// Serializes as a flat JSON object: the system fields followed by the
/// action-specific details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Store-assigned identifier.
    pub id: AuditEntryId,
    /// Uid of the identity that performed the action.
    pub actor_uid: String,
    /// Action name, e.g. `course.create`.
    pub action: String,
    /// Store-assigned time of the write.
    pub timestamp: DateTime<Utc>,
    /// Action-specific fields.
    #[serde(flatten)]
    pub details: AuditDetails,
}

/// An entry as submitted by a caller, before the store assigns id and time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub actor_uid: String,
    pub action: String,
    pub details: AuditDetails,
}

impl NewAuditEntry {
    /// Create a new entry for `actor_uid` performing `action`.
    pub fn new(actor_uid: impl Into<String>, action: AuditAction) -> Self {
        Self {
            actor_uid: actor_uid.into(),
            action: action.as_str().to_string(),
            details: AuditDetails::new(),
        }
    }

    /// Attach action-specific fields from a JSON value.
    ///
    /// Non-object values are stored under a `payload` key. Keys that collide
    /// with the entry's own fields are dropped.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        match payload {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    self.insert_detail(key, value);
                }
            }
            serde_json::Value::Null => {}
            other => self.insert_detail("payload".to_string(), other),
        }
        self
    }

    /// Attach a single detail field.
    pub fn detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json) = serde_json::to_value(value) {
            self.insert_detail(key.into(), json);
        }
        self
    }

    fn insert_detail(&mut self, key: String, value: serde_json::Value) {
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.details.insert(key, value);
        }
    }

    /// Finish the entry with the store-assigned identifier and timestamp.
    pub fn into_entry(self, id: AuditEntryId, timestamp: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id,
            actor_uid: self.actor_uid,
            action: self.action,
            timestamp,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_serializes_flat_camel_case() {
        let entry = NewAuditEntry::new("u1", AuditAction::CourseCreated)
            .with_payload(json!({"courseId": "c-1", "title": "Rust 101"}))
            .into_entry(AuditEntryId::new(), Utc::now());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["actorUid"], "u1");
        assert_eq!(value["action"], "course.create");
        assert_eq!(value["courseId"], "c-1");
        assert_eq!(value["title"], "Rust 101");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_payload_cannot_forge_system_fields() {
        let entry = NewAuditEntry::new("u1", AuditAction::CourseDeleted).with_payload(json!({
            "actorUid": "someone-else",
            "timestamp": "1970-01-01T00:00:00Z",
            "id": "forged",
            "courseId": "c-9"
        }));

        assert_eq!(entry.actor_uid, "u1");
        assert_eq!(entry.details.len(), 1);
        assert_eq!(entry.details["courseId"], "c-9");
    }

    #[test]
    fn test_scalar_payload_kept_under_payload_key() {
        let entry = NewAuditEntry::new("u1", AuditAction::CourseUpdated).with_payload(json!(42));
        assert_eq!(entry.details["payload"], 42);
    }

    #[test]
    fn test_entry_deserializes_extra_fields_into_details() {
        let id = AuditEntryId::new();
        let raw = json!({
            "id": id,
            "actorUid": "u2",
            "action": "course.publish",
            "timestamp": "2024-05-01T10:00:00Z",
            "courseId": "c-3"
        });

        let entry: AuditLogEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.actor_uid, "u2");
        assert_eq!(entry.details["courseId"], "c-3");
    }
}
