//! Route configuration for the Coursehub API server.

mod admin;
mod courses;
mod debug;
mod health;

pub use debug::{CurrentUser, DebugAuthResponse};

use crate::config::{LoggingConfig, ServerConfig};
use crate::error::{not_found, ApiError};
use crate::middleware::LoggingLayer;
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

/// Router-wide middleware settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    pub logging: LoggingConfig,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            logging: LoggingConfig::default(),
        }
    }
}

impl From<&ServerConfig> for RouterOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            request_timeout: config.server.request_timeout(),
            logging: config.logging.clone(),
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    // Outermost first: the id must exist before the logger reads it.
    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(map_response(json_error_body))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(LoggingLayer::from_config(&options.logging));

    Router::new()
        .route("/health", get(health::health))
        .route("/debug/auth", get(debug::debug_auth))
        .route("/courses", get(courses::list_published))
        .route("/courses/:id", get(courses::get_published))
        .nest("/admin", admin_routes())
        .fallback(fallback_handler)
        .layer(common_middleware)
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/audit/mine", get(admin::my_audit_log))
        .route(
            "/courses",
            get(admin::list_courses).post(admin::create_course),
        )
        .route(
            "/courses/:id",
            put(admin::update_course).delete(admin::delete_course),
        )
        .route("/courses/:id/publish", post(admin::publish_course))
        .route("/courses/:id/unpublish", post(admin::unpublish_course))
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "code": "not_found"
        })),
    )
}

/// Give the bodyless 405 from method routing and the 408 from the timeout
/// layer the same JSON envelope as every other error.
async fn json_error_body(response: Response) -> Response {
    let (error, code) = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => ("Method not allowed", "method_not_allowed"),
        StatusCode::REQUEST_TIMEOUT => ("Request timed out", "request_timeout"),
        _ => return response,
    };
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    (parts, Json(json!({ "error": error, "code": code }))).into_response()
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(anyhow::anyhow!("request handler panicked")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_timeout_gets_json_envelope() {
        let response = json_error_body(StatusCode::REQUEST_TIMEOUT.into_response()).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Request timed out");
        assert_eq!(body["code"], "request_timeout");
    }

    #[tokio::test]
    async fn test_method_not_allowed_keeps_allow_header() {
        let response = axum::http::Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET,HEAD")
            .body(Body::empty())
            .unwrap();

        let response = json_error_body(response).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD");
        assert_eq!(body_json(response).await["code"], "method_not_allowed");
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let response = json_error_body((StatusCode::CONFLICT, "busy").into_response()).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"busy");
    }
}
