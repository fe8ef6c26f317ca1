//! Request authentication: bearer extraction, token verification and role
//! resolution.

use super::jwt::TokenVerifier;
use super::types::{AuthUser, Claims, Identity, RoleSource};
use crate::error::{ApiError, ApiResult};
use crate::profiles::ProfileStore;
use axum::http::{header, HeaderMap};
use axum_extra::headers::{authorization::Bearer, Authorization, Header};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns request headers into an [`AuthUser`].
///
/// Holds no per-request state; every call re-verifies the token and, when
/// needed, re-reads the profile document.
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn TokenVerifier>,
    profiles: Option<Arc<dyn ProfileStore>>,
}

impl Authenticator {
    /// Create an authenticator. Without a profile store, identities whose
    /// token carries no role claim end up with no role.
    pub fn new(verifier: Arc<dyn TokenVerifier>, profiles: Option<Arc<dyn ProfileStore>>) -> Self {
        Self { verifier, profiles }
    }

    /// Authenticate a request from its headers.
    ///
    /// Missing or malformed credentials yield `Unauthorized`; tokens the
    /// verifier rejects yield `InvalidToken` or `TokenExpired`. A failing
    /// profile store yields `StorageUnavailable`.
    pub async fn authenticate(&self, headers: &HeaderMap) -> ApiResult<AuthUser> {
        let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;

        let claims = self.verifier.verify(&token).await.map_err(|err| {
            debug!(error = %err, "Token verification failed");
            ApiError::from(err)
        })?;

        self.resolve(claims).await
    }

    /// Build the identity for verified `claims`, falling back to the profile
    /// document when the token names no known role.
    pub async fn resolve(&self, claims: Claims) -> ApiResult<AuthUser> {
        if claims.role.is_some() && claims.role().is_none() {
            warn!(uid = %claims.sub, "Ignoring unrecognised role claim");
        }

        let (role, role_source, profile) = match claims.role() {
            Some(role) => (Some(role), RoleSource::CustomClaims, None),
            None => match &self.profiles {
                Some(profiles) => {
                    let profile = profiles.get(&claims.sub).await?;
                    match profile.as_ref().and_then(|p| p.role()) {
                        Some(role) => (Some(role), RoleSource::ProfileDocument, profile),
                        None => (None, RoleSource::Default, profile),
                    }
                }
                None => (None, RoleSource::Default, None),
            },
        };

        let identity = Identity {
            uid: claims.sub.clone(),
            email: claims.email.clone(),
            role,
            provider: claims.provider.clone(),
        };

        debug!(
            uid = %identity.uid,
            role = ?identity.role,
            role_source = ?role_source,
            "Request authenticated"
        );

        Ok(AuthUser {
            identity,
            role_source,
            claims,
            profile,
        })
    }

    /// The profile store consulted for role fallback, if any.
    pub fn profiles(&self) -> Option<&Arc<dyn ProfileStore>> {
        self.profiles.as_ref()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();
    Authorization::<Bearer>::decode(&mut values)
        .ok()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}
