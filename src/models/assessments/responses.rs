use serde::Serialize;
use ts_rs::TS;

use super::entities::{Choice, Item, Part, PerItemResult, Test};
use crate::models::classes::entities::Class;
use crate::models::enrollments::entities::EnrollmentStatus;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ItemWithChoices {
    #[serde(flatten)]
    #[ts(flatten)]
    pub item: Item,
    pub choices: Vec<Choice>,
}

// Teacher-facing detail, round-trippable against the authoring payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct TestDetailResponse {
    pub test: Test,
    pub items: Vec<ItemWithChoices>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct TestSetupResponse {
    pub parts: Vec<Part>,
    pub classes: Vec<Class>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct TestListResponse {
    pub items: Vec<Test>,
}

// Student view of a test with attempt usage.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct StudentTestSummary {
    pub test: Test,
    pub class_name: String,
    pub attempts_used: i32,
    pub attempts_remaining: i32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct StudentTestListResponse {
    pub items: Vec<StudentTestSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmissionResultResponse {
    pub att_id: Option<i64>,
    pub answered: i32,
    pub correct: i32,
    pub total: i32,
    pub percentage: f64,
    pub score_out_of_10: f64,
    pub breakdown: Vec<PerItemResult>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AttemptBrief {
    pub att_id: i64,
    pub submitted_at: Option<String>,
    pub correct: i32,
    pub percentage: f64,
    pub score_10: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ScoreboardRow {
    pub student_id: String,
    pub student_name: Option<String>,
    pub enrollment_status: Option<EnrollmentStatus>,
    pub attempt_count: i32,
    pub best_score: i32,
    pub best_percentage: f64,
    pub best_score_10: f64,
    pub last_submitted_at: Option<String>,
    pub attempts: Vec<AttemptBrief>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ScoreboardResponse {
    pub test_id: i64,
    pub test_name: String,
    pub class_id: i64,
    pub total_questions: i32,
    pub rows: Vec<ScoreboardRow>,
}
