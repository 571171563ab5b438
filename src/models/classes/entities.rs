use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub enum ClassStatus {
    Active,
    Inactive,
    Completed,
    Cancelled,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Active => "ACTIVE",
            ClassStatus::Inactive => "INACTIVE",
            ClassStatus::Completed => "COMPLETED",
            ClassStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(ClassStatus::Active),
            "INACTIVE" => Some(ClassStatus::Inactive),
            "COMPLETED" => Some(ClassStatus::Completed),
            "CANCELLED" => Some(ClassStatus::Cancelled),
            _ => None,
        }
    }
}

// A specific run of a course over a date range with a roster.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub course_id: String,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    // None means unlimited.
    pub max_students: Option<i32>,
    pub current_enrollment: i32,
    pub status: ClassStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    pub fn is_full(&self) -> bool {
        match self.max_students {
            Some(max) => self.current_enrollment >= max,
            None => false,
        }
    }
}
