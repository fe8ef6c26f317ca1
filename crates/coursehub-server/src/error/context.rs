//! Error context utilities.

use super::types::ApiError;

/// Extension trait for turning foreign results and options into `ApiError`.
pub trait ErrorContext<T> {
    /// Map a missing value or failure to a not-found error.
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|_| ApiError::NotFound(resource.into()))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::NotFound(resource.into()))
    }
}

/// Create a not found error for a specific resource.
pub fn not_found(resource: &str) -> ApiError {
    ApiError::NotFound(resource.to_string())
}
