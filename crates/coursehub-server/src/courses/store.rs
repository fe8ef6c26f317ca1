//! Course store trait.

use super::model::Course;
use crate::db::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for courses.
///
/// Listings are ordered newest first by `created_at`.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn insert(&self, course: Course) -> StoreResult<Course>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Course>>;

    /// Replace a stored course. Returns `None` if it does not exist.
    async fn update(&self, course: Course) -> StoreResult<Option<Course>>;

    /// Returns whether a course was removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    async fn list(&self, published_only: bool) -> StoreResult<Vec<Course>>;
}
