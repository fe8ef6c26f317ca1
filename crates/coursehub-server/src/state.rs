//! Shared application state.

use crate::audit::AuditRecorder;
use crate::config::ServerConfig;
use crate::db::Stores;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::{Authenticator, JwtVerifier, TokenVerifier};
use axum::extract::FromRef;
use std::sync::Arc;

/// State handed to every handler.
///
/// `stores` is `None` when the deployment has no database; handlers that
/// need one answer `Database not available`.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    stores: Option<Stores>,
}

impl AppState {
    /// Connect to the configured database and build the token verifier.
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let verifier = Arc::new(JwtVerifier::from_config(&config.auth)?);
        let stores = Stores::connect(&config.database).await?;
        Ok(Self::from_parts(verifier, stores))
    }

    /// Assemble state from an already-built verifier and stores.
    pub fn from_parts(verifier: Arc<dyn TokenVerifier>, stores: Option<Stores>) -> Self {
        let profiles = stores.as_ref().map(|s| s.profiles.clone());
        Self {
            authenticator: Arc::new(Authenticator::new(verifier, profiles)),
            stores,
        }
    }

    pub fn stores(&self) -> ApiResult<&Stores> {
        self.stores.as_ref().ok_or(ApiError::DatabaseNotAvailable)
    }

    pub fn recorder(&self) -> ApiResult<AuditRecorder> {
        self.stores().map(Stores::recorder)
    }

    pub fn has_database(&self) -> bool {
        self.stores.is_some()
    }
}

impl FromRef<AppState> for Arc<Authenticator> {
    fn from_ref(state: &AppState) -> Self {
        state.authenticator.clone()
    }
}
