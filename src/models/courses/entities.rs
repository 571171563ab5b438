use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,
    Open,
    Running,
    Closed,
    Archived,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "DRAFT",
            CourseStatus::Open => "OPEN",
            CourseStatus::Running => "RUNNING",
            CourseStatus::Closed => "CLOSED",
            CourseStatus::Archived => "ARCHIVED",
        }
    }

    /// Parse a status token, normalizing the legacy aliases that older
    /// clients still send (ACTIVE -> OPEN, INACTIVE -> CLOSED).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Some(CourseStatus::Draft),
            "OPEN" | "ACTIVE" => Some(CourseStatus::Open),
            "RUNNING" => Some(CourseStatus::Running),
            "CLOSED" | "INACTIVE" => Some(CourseStatus::Closed),
            "ARCHIVED" => Some(CourseStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub course_id: String,
    pub name: String,
    pub status: CourseStatus,
    // Prerequisite course, never the course itself.
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 1:1 with its course; the anchor for lessons.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct LearningPath {
    pub course_id: String,
    pub title: String,
    pub objective: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_status_aliases() {
        assert_eq!(CourseStatus::parse("ACTIVE"), Some(CourseStatus::Open));
        assert_eq!(CourseStatus::parse("INACTIVE"), Some(CourseStatus::Closed));
        assert_eq!(CourseStatus::parse("open"), Some(CourseStatus::Open));
        assert_eq!(CourseStatus::parse("RUNNING"), Some(CourseStatus::Running));
        assert_eq!(CourseStatus::parse("bogus"), None);
    }
}
