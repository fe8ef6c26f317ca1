//! Request body and path extraction.

use crate::error::{not_found, ApiError};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON becomes `400 bad_request`; field rule violations become
/// `400 validation_error` with per-field messages.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Course id from the `:id` path segment.
///
/// A segment that does not decode or is not a UUID cannot name a course, so
/// it is rejected as `404 Course not found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CourseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found("Course"))?;
        raw.parse().map(CourseId).map_err(|_| not_found("Course"))
    }
}
