//! API error types.

use crate::db::StoreError;
use crate::middleware::auth::VerifyError;
use axum::http::StatusCode;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a request can fail at the HTTP boundary.
///
/// Handlers return these instead of panicking; `IntoResponse` turns each one
/// into a JSON error body with the matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    ValidationError(HashMap<String, Vec<String>>),

    // 401 Unauthorized
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not authenticated")]
    NotAuthenticated,

    // Same client-facing message as `Unauthorized`; the code tells them apart.
    #[error("Authentication required")]
    TokenExpired,

    #[error("Authentication required")]
    InvalidToken,

    // 403 Forbidden
    #[error("Admin access required")]
    Forbidden,

    // 404 Not Found
    #[error("{0} not found")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("Database not available")]
    DatabaseNotAvailable,

    #[error("Storage unavailable")]
    StorageUnavailable(#[source] StoreError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,

            Self::Unauthorized
            | Self::NotAuthenticated
            | Self::TokenExpired
            | Self::InvalidToken => StatusCode::UNAUTHORIZED,

            Self::Forbidden => StatusCode::FORBIDDEN,

            Self::NotFound(_) => StatusCode::NOT_FOUND,

            Self::DatabaseNotAvailable
            | Self::StorageUnavailable(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::ValidationError(_) => "validation_error",
            Self::Unauthorized | Self::NotAuthenticated => "unauthenticated",
            Self::TokenExpired => "token_expired",
            Self::InvalidToken => "invalid_token",
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::DatabaseNotAvailable => "database_not_available",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Check if this is an authentication or authorization failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status_code(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        )
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StorageUnavailable(err)
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Expired => ApiError::TokenExpired,
            VerifyError::Invalid(_) => ApiError::InvalidToken,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::ValidationError(fields)
    }
}
