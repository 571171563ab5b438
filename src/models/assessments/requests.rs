use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ChoicePayload {
    pub label: String,
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ItemPayload {
    pub part_id: i64,
    pub order: Option<i32>,
    pub question_text: String,
    pub stimulus_text: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub choices: Vec<ChoicePayload>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateTestRequest {
    pub class_id: i64,
    pub test_name: String,
    pub status: Option<String>,
    pub available_from: Option<String>,
    pub due_at: Option<String>,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    pub items: Vec<ItemPayload>,
}

// Overwrite semantics: when `items` is present the whole child set is
// replaced; parent metadata fields are patched when present.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateTestRequest {
    pub test_name: Option<String>,
    pub status: Option<String>,
    pub available_from: Option<String>,
    pub due_at: Option<String>,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    pub items: Option<Vec<ItemPayload>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateLessonRequest {
    pub class_id: i64,
    pub part_id: i64,
    pub name: String,
    pub video_url: Option<String>,
    pub available_from: Option<String>,
    pub items: Vec<ItemPayload>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateLessonRequest {
    pub part_id: Option<i64>,
    pub name: Option<String>,
    pub video_url: Option<String>,
    pub available_from: Option<String>,
    pub items: Option<Vec<ItemPayload>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResponseEntry {
    pub item_id: Option<i64>,
    pub choice_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmissionRequest {
    pub responses: Vec<ResponseEntry>,
}

// Storage-facing, already validated by the service layer.

#[derive(Debug, Clone)]
pub struct ChoiceSpec {
    pub label: String,
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct ItemSpec {
    pub part_id: i64,
    pub order_in_part: i32,
    pub question_text: String,
    pub stimulus_text: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub choices: Vec<ChoiceSpec>,
}

#[derive(Debug, Clone)]
pub struct NewTest {
    pub class_id: i64,
    pub teacher_id: String,
    pub name: String,
    pub status: super::entities::TestStatus,
    pub available_from: Option<chrono::NaiveDateTime>,
    pub due_at: Option<chrono::NaiveDateTime>,
    pub max_attempts: i32,
    pub time_limit_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TestPatch {
    pub name: Option<String>,
    pub status: Option<super::entities::TestStatus>,
    pub available_from: Option<chrono::NaiveDateTime>,
    pub due_at: Option<chrono::NaiveDateTime>,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub lp_id: String,
    pub part_id: i64,
    pub name: String,
    pub video_url: Option<String>,
    pub available_from: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub part_id: Option<i64>,
    pub name: Option<String>,
    pub video_url: Option<String>,
    pub available_from: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub test_id: i64,
    pub student_id: String,
    pub class_id: i64,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub raw_score: Option<i32>,
    pub status: String,
    pub responses_json: Option<String>,
}
