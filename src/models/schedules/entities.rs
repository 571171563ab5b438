use serde::{Deserialize, Serialize};
use ts_rs::TS;

// One class session: (date, room, teacher, class, [start, end)).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct Schedule {
    pub id: i64,
    pub room_id: i64,
    pub class_id: i64,
    pub teacher_id: String,
    pub schedule_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
