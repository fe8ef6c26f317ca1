//! Authentication diagnostics.

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::{MaybeAuth, RoleSource};
use crate::profiles::UserProfile;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugAuthResponse {
    pub current_user: CurrentUser,
    pub user_document: Option<UserProfile>,
    pub role_source: RoleSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub uid: String,
    pub email: Option<String>,
    pub role_from_custom_claims: Option<String>,
    pub provider: String,
}

/// `GET /debug/auth`: how the caller's identity and role were resolved.
pub async fn debug_auth(
    State(state): State<AppState>,
    MaybeAuth(user): MaybeAuth,
) -> ApiResult<Json<DebugAuthResponse>> {
    let user = user.ok_or(ApiError::NotAuthenticated)?;

    // The role claim short-circuits the profile read during authentication,
    // so fetch the document here when a database is available.
    let user_document = match (&user.profile, user.role_source) {
        (Some(profile), _) => Some(profile.clone()),
        (None, RoleSource::CustomClaims) => match state.stores() {
            Ok(stores) => stores.profiles.get(&user.identity.uid).await?,
            Err(_) => None,
        },
        (None, _) => None,
    };

    Ok(Json(DebugAuthResponse {
        current_user: CurrentUser {
            uid: user.identity.uid,
            email: user.identity.email,
            role_from_custom_claims: user.claims.role,
            provider: user.identity.provider,
        },
        user_document,
        role_source: user.role_source,
    }))
}
