//! In-memory course store.

use super::model::Course;
use super::store::CourseStore;
use crate::db::StoreResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Process-local courses.
#[derive(Default)]
pub struct MemoryCourseStore {
    courses: RwLock<HashMap<Uuid, Course>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn insert(&self, course: Course) -> StoreResult<Course> {
        self.courses.write().insert(course.id, course.clone());
        Ok(course)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Course>> {
        Ok(self.courses.read().get(&id).cloned())
    }

    async fn update(&self, course: Course) -> StoreResult<Option<Course>> {
        let mut courses = self.courses.write();
        match courses.get_mut(&course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(Some(course))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.courses.write().remove(&id).is_some())
    }

    async fn list(&self, published_only: bool) -> StoreResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .courses
            .read()
            .values()
            .filter(|c| !published_only || c.published)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(courses)
    }
}
