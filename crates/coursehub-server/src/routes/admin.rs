//! Admin-only endpoints.
//!
//! Every handler takes [`AdminAuth`] first so that unauthenticated and
//! non-admin callers are turned away before any store is touched. Each
//! successful mutation is followed by an audit write; if that write fails
//! the request fails with it.

use crate::audit::MAX_LIST_LIMIT;
use crate::courses::{Course, CourseDraft};
use crate::error::{not_found, ApiResult, ErrorContext};
use crate::middleware::auth::AdminAuth;
use crate::request::{CourseId, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use coursehub_audit_types::{AuditAction, AuditLogEntry};
use serde_json::json;

/// `GET /admin/audit/mine`: the caller's own audit entries, newest first.
pub async fn my_audit_log(
    AdminAuth(user): AdminAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AuditLogEntry>>> {
    let entries = state
        .recorder()?
        .list_mine(&user.identity.uid, MAX_LIST_LIMIT)
        .await?;
    Ok(Json(entries))
}

/// `GET /admin/courses`: every course, drafts included.
pub async fn list_courses(
    AdminAuth(_user): AdminAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Course>>> {
    let courses = state.stores()?.courses.list(false).await?;
    Ok(Json(courses))
}

pub async fn create_course(
    AdminAuth(user): AdminAuth,
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<CourseDraft>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let stores = state.stores()?;
    let course = Course::from_draft(draft, &user.identity.uid);
    let course = stores.courses.insert(course).await?;

    stores
        .recorder()
        .record(
            &user.identity.uid,
            AuditAction::CourseCreated,
            json!({ "courseId": course.id, "title": course.title }),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course(
    AdminAuth(user): AdminAuth,
    State(state): State<AppState>,
    CourseId(id): CourseId,
    ValidatedJson(draft): ValidatedJson<CourseDraft>,
) -> ApiResult<Json<Course>> {
    let stores = state.stores()?;

    let mut course = stores.courses.get(id).await?.not_found("Course")?;
    course.apply_draft(draft);
    let course = stores
        .courses
        .update(course)
        .await?
        .not_found("Course")?;

    stores
        .recorder()
        .record(
            &user.identity.uid,
            AuditAction::CourseUpdated,
            json!({ "courseId": course.id, "title": course.title }),
        )
        .await?;

    Ok(Json(course))
}

pub async fn publish_course(
    admin: AdminAuth,
    state: State<AppState>,
    CourseId(id): CourseId,
) -> ApiResult<Json<Course>> {
    set_published(admin, state, id, true).await
}

pub async fn unpublish_course(
    admin: AdminAuth,
    state: State<AppState>,
    CourseId(id): CourseId,
) -> ApiResult<Json<Course>> {
    set_published(admin, state, id, false).await
}

async fn set_published(
    AdminAuth(user): AdminAuth,
    State(state): State<AppState>,
    id: uuid::Uuid,
    published: bool,
) -> ApiResult<Json<Course>> {
    let stores = state.stores()?;

    let mut course = stores.courses.get(id).await?.not_found("Course")?;
    course.set_published(published);
    let course = stores
        .courses
        .update(course)
        .await?
        .not_found("Course")?;

    let action = if published {
        AuditAction::CoursePublished
    } else {
        AuditAction::CourseUnpublished
    };
    stores
        .recorder()
        .record(&user.identity.uid, action, json!({ "courseId": course.id }))
        .await?;

    Ok(Json(course))
}

pub async fn delete_course(
    AdminAuth(user): AdminAuth,
    State(state): State<AppState>,
    CourseId(id): CourseId,
) -> ApiResult<StatusCode> {
    let stores = state.stores()?;

    let Some(course) = stores.courses.get(id).await? else {
        return Err(not_found("Course"));
    };
    if !stores.courses.delete(id).await? {
        return Err(not_found("Course"));
    }

    stores
        .recorder()
        .record(
            &user.identity.uid,
            AuditAction::CourseDeleted,
            json!({ "courseId": course.id, "title": course.title }),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
