use serde::Serialize;
use ts_rs::TS;

use super::entities::Lesson;

// Student-facing choice: the correct flag is never serialized here.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct StudentChoice {
    pub id: i64,
    pub label: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct StudentItem {
    pub id: i64,
    pub part_id: i64,
    pub question_text: String,
    pub stimulus_text: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub order_in_part: i32,
    pub choices: Vec<StudentChoice>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct ClassContext {
    pub class_id: i64,
    pub class_name: String,
    pub course_id: String,
    pub course_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct StudentLessonSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub lesson: Lesson,
    pub class_id: i64,
    pub class_name: String,
    // 1-based position within the learning path.
    pub week_index: i32,
    pub is_unlocked: bool,
    pub question_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct StudentLessonListResponse {
    pub lessons: Vec<StudentLessonSummary>,
    pub classes: Vec<ClassContext>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonDetailResponse {
    pub lesson: Lesson,
    pub items: Vec<StudentItem>,
}
