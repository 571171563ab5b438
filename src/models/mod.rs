pub mod assessments;
pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod rooms;
pub mod schedules;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery, respond_err};

// Recorded once at boot, used by the system info endpoint and startup logs.
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
