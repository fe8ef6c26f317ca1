//! Course records and the authoring payload.

use super::format::{format_duration, format_price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Difficulty level shown in the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A course as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub level: CourseLevel,
    pub duration_minutes: u32,
    pub price_cents: u32,
    pub published: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// A new unpublished course authored by `created_by`.
    pub fn from_draft(draft: CourseDraft, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            summary: draft.summary,
            description: draft.description,
            level: draft.level,
            duration_minutes: draft.duration_minutes,
            price_cents: draft.price_cents,
            published: false,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields. Publication state and authorship are kept.
    pub fn apply_draft(&mut self, draft: CourseDraft) {
        self.title = draft.title.trim().to_string();
        self.summary = draft.summary;
        self.description = draft.description;
        self.level = draft.level;
        self.duration_minutes = draft.duration_minutes;
        self.price_cents = draft.price_cents;
        self.touch();
    }

    pub fn set_published(&mut self, published: bool) {
        self.published = published;
        self.touch();
    }

    fn touch(&mut self) {
        // Keep updated_at strictly after created_at even on coarse clocks.
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }
}

/// Catalog listing entry with display-ready duration and price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub level: CourseLevel,
    pub duration: String,
    pub price: String,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            summary: course.summary.clone(),
            level: course.level,
            duration: format_duration(course.duration_minutes),
            price: format_price(course.price_cents),
        }
    }
}

/// Course authoring request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    #[validate(length(min = 3, max = 120, message = "must be 3 to 120 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 280, message = "must be at most 280 characters"))]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level: CourseLevel,
    #[validate(range(min = 1, max = 10000, message = "must be 1 to 10000 minutes"))]
    pub duration_minutes: u32,
    /// Bounded by the Postgres `INTEGER` column.
    #[serde(default)]
    #[validate(range(max = 2147483647, message = "must be at most 2147483647 cents"))]
    pub price_cents: u32,
}
