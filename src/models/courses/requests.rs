use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct LearningPathPayload {
    pub title: String,
    pub objective: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub course_id: String,
    pub name: String,
    pub status: Option<String>,
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub learning_path: Option<LearningPathPayload>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub status: Option<String>,
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub learning_path: Option<LearningPathPayload>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<String>,
    pub search: Option<String>,
}

// Storage-facing, already validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_id: String,
    pub name: String,
    pub status: super::entities::CourseStatus,
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub learning_path: Option<LearningPathPayload>,
}

#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub status: Option<super::entities::CourseStatus>,
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub learning_path: Option<LearningPathPayload>,
}
