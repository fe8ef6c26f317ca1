//! User profile documents.
//!
//! Profiles are read only here. They are the fallback source of a user's
//! role when the identity token carries no role claim.

mod memory;
mod postgres;

pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;

use crate::db::StoreResult;
use crate::middleware::auth::Role;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Role as written in the document; may hold values this server does
    /// not recognise.
    #[serde(default)]
    pub role: Option<String>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// The document's role, if it names a known one.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Read access to profile documents keyed by uid.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, uid: &str) -> StoreResult<Option<UserProfile>>;
}
