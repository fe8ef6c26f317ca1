//! Error response implementation.

use super::types::ApiError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, warn};

/// Error response body: `{"error": <message>, "code": <code>}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            // Details go to the log only, never to the client.
            error!(
                error = %self,
                source = ?std::error::Error::source(&self),
                code = self.error_code(),
                "Server error occurred"
            );
        } else if self.is_auth_error() {
            warn!(
                error = %self,
                code = self.error_code(),
                "Auth error occurred"
            );
        }

        let fields = match &self {
            ApiError::ValidationError(field_errors) => Some(field_errors.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            fields,
        };

        (self.status_code(), Json(body)).into_response()
    }
}
