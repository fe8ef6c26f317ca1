//! Liveness endpoint.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: static, touches no store.
pub async fn health() -> Json<Value> {
    Json(json!({
        "ok": true,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
