//! Database connection management and store wiring.
//!
//! Every collection the server touches sits behind a trait object so a
//! deployment can run against Postgres, against process-local memory, or
//! with no database at all.

pub mod migration;
pub mod pool;

pub use migration::run_migrations;
pub use pool::{create_pool, verify_connection};

use crate::{
    audit::{AuditLogStore, AuditRecorder, MemoryAuditLogStore, PgAuditLogStore},
    config::DatabaseConfig,
    courses::{CourseStore, MemoryCourseStore, PgCourseStore},
    profiles::{MemoryProfileStore, PgProfileStore, ProfileStore},
};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// URL selecting the in-memory stores.
pub const MEMORY_URL: &str = "memory://";

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Handles to every collection the server reads or writes.
#[derive(Clone)]
pub struct Stores {
    pub audit: Arc<dyn AuditLogStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub courses: Arc<dyn CourseStore>,
}

impl Stores {
    /// Process-local stores, empty on creation.
    pub fn in_memory() -> Self {
        Self {
            audit: Arc::new(MemoryAuditLogStore::new()),
            profiles: Arc::new(MemoryProfileStore::new()),
            courses: Arc::new(MemoryCourseStore::new()),
        }
    }

    /// Stores backed by a Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            audit: Arc::new(PgAuditLogStore::new(pool.clone())),
            profiles: Arc::new(PgProfileStore::new(pool.clone())),
            courses: Arc::new(PgCourseStore::new(pool)),
        }
    }

    /// Build stores for the configured database, or `None` when no database
    /// URL is set.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Option<Self>> {
        let Some(url) = config.url() else {
            info!("No database configured; database-backed routes are disabled");
            return Ok(None);
        };

        if url == MEMORY_URL {
            info!("Using in-memory stores");
            return Ok(Some(Self::in_memory()));
        }

        let pool = create_pool(config, url).await?;
        if config.run_migrations {
            run_migrations(&pool).await?;
        }
        Ok(Some(Self::postgres(pool)))
    }

    /// Audit recorder over this deployment's log store.
    pub fn recorder(&self) -> AuditRecorder {
        AuditRecorder::new(self.audit.clone())
    }
}
