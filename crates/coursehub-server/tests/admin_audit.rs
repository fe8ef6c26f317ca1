//! `GET /admin/audit/mine` end to end.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use common::{admin_token, router, token, DownAuditStore, TestApp};
use coursehub_audit_types::{AuditAction, NewAuditEntry};
use coursehub_server::audit::AuditLogStore;
use coursehub_server::db::Stores;
use coursehub_server::profiles::UserProfile;
use serde_json::json;
use std::sync::Arc;

const MINE: &str = "/admin/audit/mine";

#[tokio::test]
async fn test_missing_credential_is_401_without_store_access() {
    let app = TestApp::new();

    let (status, body) = app.get(MINE, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
    assert_eq!(app.audit.calls(), 0);
    assert_eq!(app.profiles.reads.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_forged_or_expired_token_is_401() {
    let app = TestApp::new();

    let (status, body) = app.get(MINE, Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");

    let expired = coursehub_server::middleware::auth::encode_token(
        &coursehub_server::middleware::auth::Claims::new("u1", -3600).with_role("admin"),
        common::SECRET,
    )
    .unwrap();
    let (status, body) = app.get(MINE, Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "token_expired");
    assert_eq!(app.audit.calls(), 0);
}

#[tokio::test]
async fn test_non_admin_is_403_without_audit_read() {
    let app = TestApp::new();

    for role in [Some("learner"), Some("instructor"), Some("superuser"), None] {
        let (status, body) = app.get(MINE, Some(&token("u2", role))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {role:?}");
        assert!(body["error"].is_string());
    }
    assert_eq!(app.audit.calls(), 0);
}

#[tokio::test]
async fn test_role_claim_must_match_exactly() {
    let app = TestApp::new();

    for role in ["ADMIN", " Admin ", "aDmIn", "admin "] {
        let (status, _) = app.get(MINE, Some(&token("u9", Some(role)))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {role:?}");
    }
    assert_eq!(app.audit.calls(), 0);
}

#[tokio::test]
async fn test_non_string_role_claim_falls_back_to_profile() {
    let app = TestApp::new().with_profile(UserProfile::new("u7").with_role("admin"));
    let now = Utc::now().timestamp();
    let raw = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "sub": "u7", "iat": now, "exp": now + 3600, "role": ["admin"] }),
        &jsonwebtoken::EncodingKey::from_secret(common::SECRET.as_bytes()),
    )
    .unwrap();

    let (status, _) = app.get(MINE, Some(&raw)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.profiles.reads.load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn test_returns_own_entries_newest_first_capped_at_50() {
    let app = TestApp::new();
    for i in 0..60 {
        app.audit
            .inner
            .append(
                NewAuditEntry::new("u1", AuditAction::CourseUpdated).with_payload(json!({ "n": i })),
            )
            .await
            .unwrap();
        if i % 12 == 0 {
            app.audit
                .inner
                .append(NewAuditEntry::new("u2", AuditAction::CourseDeleted))
                .await
                .unwrap();
        }
    }

    let (status, body) = app.get(MINE, Some(&admin_token("u1"))).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 50);
    assert!(entries.iter().all(|e| e["actorUid"] == "u1"));
    assert_eq!(entries[0]["n"], 59);
    assert_eq!(entries[49]["n"], 10);

    let timestamps: Vec<DateTime<Utc>> = entries
        .iter()
        .map(|e| e["timestamp"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_other_admins_entries_are_invisible() {
    let app = TestApp::new();
    app.audit
        .inner
        .append(NewAuditEntry::new("u2", AuditAction::CoursePublished))
        .await
        .unwrap();

    let (status, body) = app.get(MINE, Some(&admin_token("u1"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_admin_role_from_profile_document() {
    let app = TestApp::new().with_profile(UserProfile::new("u3").with_role("admin"));

    let (status, _) = app.get(MINE, Some(&token("u3", None))).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_without_database_is_500_after_auth() {
    let router = router(None);

    let (status, body) = common::send(&router, Method::GET, MINE, Some(&admin_token("u1")), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database not available");

    // Credential and role are still checked first.
    let (status, _) = common::send(&router, Method::GET, MINE, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) =
        common::send(&router, Method::GET, MINE, Some(&token("u1", Some("learner"))), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unreachable_store_is_generic_500() {
    let mut stores = Stores::in_memory();
    stores.audit = Arc::new(DownAuditStore) as Arc<dyn AuditLogStore>;
    let router = router(Some(stores));

    let (status, body) = common::send(&router, Method::GET, MINE, Some(&admin_token("u1")), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Storage unavailable");
    assert!(!body.to_string().contains("connection refused"));
}
