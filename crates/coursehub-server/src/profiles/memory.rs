//! In-memory profile store.

use super::{ProfileStore, UserProfile};
use crate::db::StoreResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local profile documents.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile. Used to seed local deployments and tests.
    pub fn insert(&self, profile: UserProfile) {
        self.profiles.write().insert(profile.uid.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, uid: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.profiles.read().get(uid).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_by_uid() {
        let store = MemoryProfileStore::new();
        store.insert(UserProfile::new("u1").with_role("admin"));

        assert!(store.get("u1").await.unwrap().is_some());
        assert!(store.get("u2").await.unwrap().is_none());
    }
}
