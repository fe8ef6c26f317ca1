//! Audited actions.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Privileged actions that produce an audit entry.
///
/// Entries persist the action as a plain string (see
/// [`AuditLogEntry::action`](crate::AuditLogEntry::action)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
pub enum AuditAction {
    #[serde(rename = "course.create")]
    #[strum(serialize = "course.create")]
    CourseCreated,
    #[serde(rename = "course.update")]
    #[strum(serialize = "course.update")]
    CourseUpdated,
    #[serde(rename = "course.publish")]
    #[strum(serialize = "course.publish")]
    CoursePublished,
    #[serde(rename = "course.unpublish")]
    #[strum(serialize = "course.unpublish")]
    CourseUnpublished,
    #[serde(rename = "course.delete")]
    #[strum(serialize = "course.delete")]
    CourseDeleted,
}

impl AuditAction {
    /// Wire name stored in `AuditLogEntry::action`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseCreated => "course.create",
            Self::CourseUpdated => "course.update",
            Self::CoursePublished => "course.publish",
            Self::CourseUnpublished => "course.unpublish",
            Self::CourseDeleted => "course.delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_strum_and_as_str_agree() {
        for action in [
            AuditAction::CourseCreated,
            AuditAction::CourseUpdated,
            AuditAction::CoursePublished,
            AuditAction::CourseUnpublished,
            AuditAction::CourseDeleted,
        ] {
            assert_eq!(action.to_string(), action.as_str());
            assert_eq!(action.as_ref(), action.as_str());
            assert_eq!(AuditAction::from_str(action.as_str()).unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(AuditAction::from_str("course.explode").is_err());
    }
}
