use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Immutable catalog of test sections with a fixed order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub display_order: i32,
}

/// Group key binding an item to its lesson.
pub fn lesson_group_key(lesson_id: i64) -> String {
    format!("lesson-{lesson_id}")
}

/// Group key binding an item to its test.
pub fn test_group_key(test_id: i64) -> String {
    format!("test-{test_id}")
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Item {
    pub id: i64,
    pub part_id: i64,
    pub test_id: Option<i64>,
    // Authoritative parent link; the group key below is kept as the derived
    // legacy form for existing data.
    pub lesson_id: Option<i64>,
    pub item_group_key: Option<String>,
    pub question_text: String,
    pub stimulus_text: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub order_in_part: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Choice {
    pub id: i64,
    pub item_id: i64,
    pub label: String, // single character
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum TestStatus {
    Active,
    Inactive,
    Archived,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Active => "ACTIVE",
            TestStatus::Inactive => "INACTIVE",
            TestStatus::Archived => "ARCHIVED",
        }
    }

    /// Parse a status token; the legacy "DRAFT" normalizes to INACTIVE.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(TestStatus::Active),
            "INACTIVE" | "DRAFT" => Some(TestStatus::Inactive),
            "ARCHIVED" => Some(TestStatus::Archived),
            _ => None,
        }
    }
}

pub const DEFAULT_MAX_ATTEMPTS: i32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Test {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: String,
    pub name: String,
    pub status: TestStatus,
    pub available_from: Option<chrono::NaiveDateTime>,
    pub due_at: Option<chrono::NaiveDateTime>,
    pub max_attempts: i32,
    pub time_limit_minutes: Option<i32>,
    // Cached item count; a live count is the fallback when stale.
    pub total_questions: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// One immutable record of a student's submission to a test.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Attempt {
    pub att_id: i64,
    pub test_id: i64,
    pub student_id: String,
    pub class_id: i64,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub raw_score: Option<i32>,
    pub status: String,
    pub responses_json: Option<String>,
}

/// Per-item entry inside the responses blob.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct PerItemResult {
    pub item_id: i64,
    pub selected_choice_id: Option<i64>,
    pub correct_choice_id: Option<i64>,
    pub is_correct: bool,
}

/// Tagged shape of `Attempt.responses_json`. Version 0 is the legacy
/// untagged `{correct_count, percentage}` document still present in old rows.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResponsesBlob {
    #[serde(default)]
    pub version: u32,
    pub correct_count: i32,
    pub percentage: f64,
    #[serde(default)]
    pub per_item: Vec<PerItemResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalizes_draft() {
        assert_eq!(TestStatus::parse("DRAFT"), Some(TestStatus::Inactive));
        assert_eq!(TestStatus::parse("draft"), Some(TestStatus::Inactive));
        assert_eq!(TestStatus::parse("ACTIVE"), Some(TestStatus::Active));
        assert_eq!(TestStatus::parse("PUBLISHED"), None);
    }

    #[test]
    fn test_group_keys() {
        assert_eq!(lesson_group_key(12), "lesson-12");
        assert_eq!(test_group_key(3), "test-3");
    }

    #[test]
    fn test_responses_blob_reads_legacy_shape() {
        let legacy = r#"{"correct_count": 6, "percentage": 60.0}"#;
        let blob: ResponsesBlob = serde_json::from_str(legacy).unwrap();
        assert_eq!(blob.version, 0);
        assert_eq!(blob.correct_count, 6);
        assert!(blob.per_item.is_empty());

        let tagged = r#"{"version": 1, "correct_count": 8, "percentage": 80.0,
            "per_item": [{"item_id": 1, "selected_choice_id": 2,
                          "correct_choice_id": 2, "is_correct": true}]}"#;
        let blob: ResponsesBlob = serde_json::from_str(tagged).unwrap();
        assert_eq!(blob.version, 1);
        assert_eq!(blob.per_item.len(), 1);
    }
}
