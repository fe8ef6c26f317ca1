//! API benchmarks for the Coursehub server.

use axum::{body::Body, http::Request};
use coursehub_audit_types::AuditAction;
use coursehub_server::audit::{AuditRecorder, MemoryAuditLogStore, MAX_LIST_LIMIT};
use coursehub_server::db::Stores;
use coursehub_server::middleware::auth::JwtVerifier;
use coursehub_server::{create_router, AppState, RouterOptions};
use criterion::{criterion_group, criterion_main, Criterion};
use jsonwebtoken::Algorithm;
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn benchmark_health_check(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let verifier = Arc::new(JwtVerifier::new("bench-secret", Algorithm::HS256));
    let router = create_router(AppState::from_parts(verifier, None), &RouterOptions::default());

    c.bench_function("health_check", |b| {
        b.to_async(&rt).iter(|| {
            let router = router.clone();
            async move {
                let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
                router.oneshot(request).await.unwrap()
            }
        })
    });
}

fn benchmark_list_mine(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditLogStore::new()));

    rt.block_on(async {
        for i in 0..2_000 {
            let actor = if i % 4 == 0 { "admin-1" } else { "admin-2" };
            recorder
                .record(actor, AuditAction::CourseUpdated, json!({ "n": i }))
                .await
                .unwrap();
        }
    });

    c.bench_function("audit_list_mine", |b| {
        b.to_async(&rt)
            .iter(|| async { recorder.list_mine("admin-1", MAX_LIST_LIMIT).await.unwrap() })
    });

    let stores = Stores::in_memory();
    c.bench_function("audit_record", |b| {
        b.to_async(&rt).iter(|| async {
            stores
                .recorder()
                .record("admin-1", AuditAction::CourseCreated, json!({ "courseId": "c-1" }))
                .await
                .unwrap()
        })
    });
}

criterion_group!(benches, benchmark_health_check, benchmark_list_mine);
criterion_main!(benches);
