//! Postgres-backed course store.

use super::model::{Course, CourseLevel};
use super::store::CourseStore;
use crate::db::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const COLUMNS: &str = "id, title, summary, description, level, duration_minutes, \
                       price_cents, published, created_by, created_at, updated_at";

/// Courses persisted in the `courses` table.
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    summary: String,
    description: String,
    level: String,
    duration_minutes: i32,
    price_cents: i32,
    published: bool,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = StoreError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let level: CourseLevel = row
            .level
            .parse()
            .map_err(|_| StoreError::Backend(format!("unknown course level '{}'", row.level)))?;
        let non_negative = |value: i32, column: &str| {
            u32::try_from(value)
                .map_err(|_| StoreError::Backend(format!("negative {column} for course {}", row.id)))
        };

        Ok(Course {
            id: row.id,
            duration_minutes: non_negative(row.duration_minutes, "duration_minutes")?,
            price_cents: non_negative(row.price_cents, "price_cents")?,
            title: row.title,
            summary: row.summary,
            description: row.description,
            level,
            published: row.published,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn to_i32(value: u32) -> StoreResult<i32> {
    i32::try_from(value).map_err(|_| StoreError::Backend(format!("value {value} out of range")))
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn insert(&self, course: Course) -> StoreResult<Course> {
        let row: CourseRow = sqlx::query_as(&format!(
            "INSERT INTO courses ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        ))
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.summary)
        .bind(&course.description)
        .bind(course.level.as_ref())
        .bind(to_i32(course.duration_minutes)?)
        .bind(to_i32(course.price_cents)?)
        .bind(course.published)
        .bind(&course.created_by)
        .bind(course.created_at)
        .bind(course.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Course>> {
        let row: Option<CourseRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Course::try_from).transpose()
    }

    async fn update(&self, course: Course) -> StoreResult<Option<Course>> {
        let row: Option<CourseRow> = sqlx::query_as(&format!(
            "UPDATE courses SET title = $2, summary = $3, description = $4, level = $5, \
             duration_minutes = $6, price_cents = $7, published = $8, updated_at = $9 \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.summary)
        .bind(&course.description)
        .bind(course.level.as_ref())
        .bind(to_i32(course.duration_minutes)?)
        .bind(to_i32(course.price_cents)?)
        .bind(course.published)
        .bind(course.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Course::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, published_only: bool) -> StoreResult<Vec<Course>> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM courses \
             WHERE published OR NOT $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(published_only)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Course::try_from).collect()
    }
}
