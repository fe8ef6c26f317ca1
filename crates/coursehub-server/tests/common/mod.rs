//! Shared integration test infrastructure.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use coursehub_audit_types::{AuditLogEntry, NewAuditEntry};
use coursehub_server::audit::{AuditLogStore, MemoryAuditLogStore};
use coursehub_server::courses::MemoryCourseStore;
use coursehub_server::db::{StoreError, StoreResult, Stores};
use coursehub_server::middleware::auth::{encode_token, Claims, JwtVerifier};
use coursehub_server::profiles::{MemoryProfileStore, ProfileStore, UserProfile};
use coursehub_server::{create_router, AppState, RouterOptions};
use jsonwebtoken::Algorithm;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Mint a valid HS256 identity token for `uid`.
pub fn token(uid: &str, role: Option<&str>) -> String {
    let mut claims = Claims::new(uid, 3600).with_email(format!("{uid}@example.com"));
    if let Some(role) = role {
        claims = claims.with_role(role);
    }
    encode_token(&claims, SECRET).unwrap()
}

pub fn admin_token(uid: &str) -> String {
    token(uid, Some("admin"))
}

/// Audit store that counts every call before delegating to memory.
#[derive(Default)]
pub struct CountingAuditStore {
    pub inner: MemoryAuditLogStore,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingAuditStore {
    pub fn calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditLogStore for CountingAuditStore {
    async fn append(&self, entry: NewAuditEntry) -> StoreResult<AuditLogEntry> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.append(entry).await
    }

    async fn list_by_actor(&self, actor_uid: &str, limit: usize) -> StoreResult<Vec<AuditLogEntry>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_by_actor(actor_uid, limit).await
    }
}

/// Profile store that counts reads before delegating to memory.
#[derive(Default)]
pub struct CountingProfileStore {
    pub inner: MemoryProfileStore,
    pub reads: AtomicUsize,
}

#[async_trait]
impl ProfileStore for CountingProfileStore {
    async fn get(&self, uid: &str) -> StoreResult<Option<UserProfile>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(uid).await
    }
}

/// Audit store whose backend is unreachable.
pub struct DownAuditStore;

#[async_trait]
impl AuditLogStore for DownAuditStore {
    async fn append(&self, _entry: NewAuditEntry) -> StoreResult<AuditLogEntry> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn list_by_actor(&self, _: &str, _: usize) -> StoreResult<Vec<AuditLogEntry>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Router wired to observable in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub audit: Arc<CountingAuditStore>,
    pub profiles: Arc<CountingProfileStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let audit = Arc::new(CountingAuditStore::default());
        let profiles = Arc::new(CountingProfileStore::default());
        let stores = Stores {
            audit: audit.clone(),
            profiles: profiles.clone(),
            courses: Arc::new(MemoryCourseStore::new()),
        };
        Self {
            router: router(Some(stores)),
            audit,
            profiles,
        }
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.profiles.inner.insert(profile);
        self
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, token, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }
}

/// Router with the given stores; `None` means no database configured.
pub fn router(stores: Option<Stores>) -> Router {
    let verifier = Arc::new(JwtVerifier::new(SECRET, Algorithm::HS256));
    create_router(AppState::from_parts(verifier, stores), &RouterOptions::default())
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
