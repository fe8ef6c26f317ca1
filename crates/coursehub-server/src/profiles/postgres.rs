//! Postgres-backed profile store.

use super::{ProfileStore, UserProfile};
use crate::db::StoreResult;
use async_trait::async_trait;
use sqlx::PgPool;

/// Profiles persisted in the `user_profiles` table.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, uid: &str) -> StoreResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT uid, email, display_name, role FROM user_profiles WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
