//! Append-only audit log of privileged actions.

mod memory;
mod postgres;
mod recorder;
mod store;

pub use memory::MemoryAuditLogStore;
pub use postgres::PgAuditLogStore;
pub use recorder::{AuditRecorder, MAX_LIST_LIMIT};
pub use store::AuditLogStore;
