//! Request logging and log redaction.

pub mod layer;
pub mod redaction;

pub use layer::{LoggingLayer, LoggingMiddleware};
pub use redaction::{redact_headers, redact_json, REDACTED};
