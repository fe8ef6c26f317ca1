//! Authentication extractors for handlers.

use super::authenticator::Authenticator;
use super::types::AuthUser;
use crate::error::ApiError;
use crate::middleware::authz;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;

/// Extractor for authenticated user (required).
pub struct Auth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for Auth
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = Arc::<Authenticator>::from_ref(state);
        authenticator.authenticate(&parts.headers).await.map(Auth)
    }
}

/// Extractor for optional authenticated user.
///
/// Missing or rejected credentials yield `None`; storage failures while
/// resolving the role are still surfaced.
pub struct MaybeAuth(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuth
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = Arc::<Authenticator>::from_ref(state);
        match authenticator.authenticate(&parts.headers).await {
            Ok(user) => Ok(MaybeAuth(Some(user))),
            Err(err) if err.is_auth_error() => Ok(MaybeAuth(None)),
            Err(err) => Err(err),
        }
    }
}

/// Extractor that requires admin role.
pub struct AdminAuth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;
        authz::require_admin(&user.identity)?;
        Ok(AdminAuth(user))
    }
}
