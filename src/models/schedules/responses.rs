use serde::Serialize;
use ts_rs::TS;

use super::entities::Schedule;
use crate::models::rooms::entities::Room;

// Which resource collides: the room, the teacher, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub enum ConflictSide {
    Room,
    Teacher,
    Both,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleConflictInfo {
    pub side: ConflictSide,
    pub schedule_id: i64,
    pub room_id: i64,
    pub teacher_id: String,
    pub schedule_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct FailedDate {
    pub date: chrono::NaiveDate,
    pub reason: String,
}

// Partial success is a first-class outcome of recurring creation.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct RecurringCreateResponse {
    pub created: Vec<Schedule>,
    pub failed: Vec<FailedDate>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct DaySchedules {
    pub date: chrono::NaiveDate,
    pub schedules: Vec<Schedule>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct TeacherAvailabilityResponse {
    pub teacher_id: String,
    pub days: Vec<DaySchedules>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct AvailableRoomsResponse {
    pub date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub rooms: Vec<Room>,
}
