use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<String>,
    pub status: Option<String>,
    // Only classes whose date range covers today.
    pub ongoing: Option<bool>,
    // Only classes with open seats.
    pub available_only: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub course_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub max_students: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_students: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct EnrollRequest {
    pub student_id: String,
}

// Storage-facing, already validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub course_id: String,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub max_students: Option<i32>,
    pub status: super::entities::ClassStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub max_students: Option<i32>,
    pub status: Option<super::entities::ClassStatus>,
}
