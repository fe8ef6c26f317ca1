//! Sensitive data redaction for logs and audit payloads.

use axum::http::HeaderMap;
use serde_json::Value;

/// Replacement for redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Headers whose values never reach the logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Substrings marking a JSON key as sensitive, compared against the key
/// lowercased with `_` and `-` removed.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "apikey",
    "authorization",
    "credential",
];

/// Header names and values, with sensitive values replaced by [`REDACTED`].
pub fn redact_headers(headers: &HeaderMap, additional: &[String]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name = name.as_str();
            let sensitive = SENSITIVE_HEADERS.contains(&name)
                || additional.iter().any(|h| h.eq_ignore_ascii_case(name));
            let value = if sensitive {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("[non-utf8]").to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized: String = key
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    SENSITIVE_FIELDS.iter().any(|f| normalized.contains(f))
}

/// Redact sensitive fields of a JSON value in place, at any depth.
pub fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *val = Value::String(REDACTED.to_string());
                } else {
                    redact_json(val);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}
