//! Audit log types for Coursehub.
//!
//! Audit entries are append-only records of privileged actions. Callers
//! submit a [`NewAuditEntry`]; the log store assigns the identifier and the
//! timestamp and hands back the persisted [`AuditLogEntry`].

mod action;
mod entry;
mod id;

pub use action::AuditAction;
pub use entry::{AuditDetails, AuditLogEntry, NewAuditEntry};
pub use id::AuditEntryId;
