//! Public course catalog.

use crate::courses::{Course, CourseSummary};
use crate::error::{ApiResult, ErrorContext};
use crate::request::CourseId;
use crate::state::AppState;
use axum::{
    extract::State,
    Json,
};

/// `GET /courses`: published courses, newest first.
pub async fn list_published(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseSummary>>> {
    let courses = state.stores()?.courses.list(true).await?;
    Ok(Json(courses.iter().map(CourseSummary::from).collect()))
}

/// `GET /courses/:id`: a single published course. Drafts are reported as
/// missing.
pub async fn get_published(
    State(state): State<AppState>,
    CourseId(id): CourseId,
) -> ApiResult<Json<Course>> {
    let course = state
        .stores()?
        .courses
        .get(id)
        .await?
        .filter(|course| course.published)
        .not_found("Course")?;

    Ok(Json(course))
}
