use serde::Serialize;
use ts_rs::TS;

use super::entities::Class;
use crate::models::PaginationInfo;
use crate::models::enrollments::entities::Enrollment;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct EnrollmentResponse {
    pub enrollment: Enrollment,
    pub class: Class,
}
