use serde::Deserialize;
use ts_rs::TS;

// Single session payload. Also the `base_data` of recurring requests; the
// legacy field names `schedule_startime`/`schedule_endtime` are the wire
// format existing clients send.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct SchedulePayload {
    pub class_id: i64,
    pub room_id: i64,
    // Teacher user id (T + 8 digits).
    pub user_id: String,
    pub schedule_date: Option<String>,
    #[serde(rename = "schedule_startime")]
    pub start_time: String,
    #[serde(rename = "schedule_endtime")]
    pub end_time: String,
    // Sunday-first weekday indexes; presence switches the create endpoint
    // into expansion over the class date range.
    pub weekdays: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub enum RecurrenceType {
    Daily,
    Weekly,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct RecurringScheduleRequest {
    pub base_data: SchedulePayload,
    pub recurrence_type: RecurrenceType,
    pub end_date: String,
    pub weekdays: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub room_id: Option<i64>,
    pub class_id: Option<i64>,
    pub user_id: Option<String>,
    pub schedule_date: Option<String>,
    #[serde(rename = "schedule_startime")]
    pub start_time: Option<String>,
    #[serde(rename = "schedule_endtime")]
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct AvailableRoomsQuery {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub min_capacity: Option<i32>,
}

// Either a single `date` or a `[from, to]` range.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct TeacherAvailabilityQuery {
    // Defaults to the authenticated teacher; admins may query any teacher.
    pub teacher_id: Option<String>,
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

// Storage-facing, already validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub room_id: i64,
    pub class_id: i64,
    pub teacher_id: String,
    pub schedule_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
}
