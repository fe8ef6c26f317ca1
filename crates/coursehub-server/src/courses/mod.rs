//! Course catalog: the domain the admin actions operate on.

mod format;
mod memory;
mod model;
mod postgres;
mod store;

pub use format::{format_duration, format_price};
pub use memory::MemoryCourseStore;
pub use model::{Course, CourseDraft, CourseLevel, CourseSummary};
pub use postgres::PgCourseStore;
pub use store::CourseStore;
