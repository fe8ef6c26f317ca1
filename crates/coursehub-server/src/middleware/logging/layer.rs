//! Request logging middleware.

use super::redaction::redact_headers;
use crate::config::LoggingConfig;
use axum::{body::Body, extract::Request, http::Response};
use futures::future::BoxFuture;
use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::{debug, info, info_span, Instrument};

/// Header carrying the request id set by `SetRequestIdLayer`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs one event when a request starts and one when it completes.
///
/// Paths listed in `exclude_paths` are passed through silently. Header
/// values are only ever logged after redaction.
#[derive(Clone)]
pub struct LoggingLayer {
    exclude_paths: Arc<Vec<String>>,
}

impl LoggingLayer {
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            exclude_paths: Arc::new(config.exclude_paths.clone()),
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware {
            inner,
            exclude_paths: self.exclude_paths.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
    exclude_paths: Arc<Vec<String>>,
}

impl<S> LoggingMiddleware<S> {
    fn is_excluded(&self, path: &str) -> bool {
        self.exclude_paths.iter().any(|p| p == path)
    }
}

impl<S> Service<Request> for LoggingMiddleware<S>
where
    S: Service<Request, Response = Response<Body>, Error = std::convert::Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Swap in the clone so the instance that was polled ready is the one called.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if self.is_excluded(req.uri().path()) {
            return Box::pin(inner.call(req));
        }

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                info!(event = "request_started");
                debug!(headers = ?redact_headers(req.headers(), &[]), "Request headers");

                let response = inner.call(req).await?;
                let status = response.status();

                info!(
                    event = "request_completed",
                    status = status.as_u16(),
                    duration_ms = start.elapsed().as_millis() as u64,
                );

                Ok(response)
            }
            .instrument(span),
        )
    }
}
