use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{ScheduleService, conflict};
use crate::models::ApiResponse;
use crate::models::classes::entities::Class;
use crate::models::schedules::requests::{NewSchedule, RecurrenceType, SchedulePayload};
use crate::models::schedules::responses::{FailedDate, RecurringCreateResponse};
use crate::storage::{ScheduleCheckOutcome, Storage};
use crate::utils::datetime::parse_time;
use crate::utils::validate::validate_user_id;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

// Payload fields shared by every session the request creates.
pub(super) struct ScheduleBase {
    pub class: Class,
    pub room_id: i64,
    pub teacher_id: String,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
}

impl ScheduleBase {
    pub fn on_date(&self, date: NaiveDate) -> NewSchedule {
        NewSchedule {
            room_id: self.room_id,
            class_id: self.class.id,
            teacher_id: self.teacher_id.clone(),
            schedule_date: date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Resolve and validate the referenced room, class and teacher.
pub(super) async fn validate_base(
    storage: &Arc<dyn Storage>,
    payload: &SchedulePayload,
) -> Result<ScheduleBase, HttpResponse> {
    if validate_user_id(&payload.user_id).is_err() || !payload.user_id.starts_with('T') {
        return Err(bad_request("A valid teacher id is required"));
    }

    let start_time = parse_time(&payload.start_time).map_err(|e| bad_request(e.to_string()))?;
    let end_time = parse_time(&payload.end_time).map_err(|e| bad_request(e.to_string()))?;
    if start_time >= end_time {
        return Err(bad_request("Start time must be before end time"));
    }

    match storage.get_teacher_by_id(&payload.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(bad_request(format!("Teacher {} does not exist", payload.user_id)));
        }
        Err(e) => return Err(crate::models::respond_err(&e)),
    }
    match storage.get_room(payload.room_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(bad_request(format!("Room {} does not exist", payload.room_id)));
        }
        Err(e) => return Err(crate::models::respond_err(&e)),
    }
    let class = match storage.get_class(payload.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Err(bad_request(format!("Class {} does not exist", payload.class_id)));
        }
        Err(e) => return Err(crate::models::respond_err(&e)),
    };

    Ok(ScheduleBase {
        class,
        room_id: payload.room_id,
        teacher_id: payload.user_id.clone(),
        start_time,
        end_time,
    })
}

/// Create one session per date, keeping going past conflicts. Each date is
/// its own conflict-checked transaction; the response reports both halves.
pub(super) async fn create_many(
    storage: &Arc<dyn Storage>,
    base: &ScheduleBase,
    dates: Vec<NaiveDate>,
) -> Result<RecurringCreateResponse, crate::errors::LmsError> {
    let mut created = Vec::new();
    let mut failed = Vec::new();

    for date in dates {
        let candidate = base.on_date(date);
        match storage.create_schedule_checked(candidate.clone()).await? {
            ScheduleCheckOutcome::Created(schedule) => created.push(schedule),
            ScheduleCheckOutcome::Conflicts(conflicts) => {
                let infos = conflict::describe(&candidate, &conflicts);
                let reason = infos
                    .iter()
                    .map(|info| format!("{:?} conflict with schedule {}", info.side, info.schedule_id))
                    .collect::<Vec<_>>()
                    .join("; ");
                failed.push(FailedDate { date, reason });
            }
        }
    }

    Ok(RecurringCreateResponse { created, failed })
}

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    data: SchedulePayload,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let base = match validate_base(&storage, &data).await {
        Ok(base) => base,
        Err(response) => return Ok(response),
    };

    // A weekday set switches this endpoint into weekly expansion over the
    // class date range.
    if let Some(ref weekdays) = data.weekdays
        && !weekdays.is_empty()
    {
        let dates = match super::recurrence::expand(
            RecurrenceType::Weekly,
            base.class.start_date,
            base.class.end_date,
            Some(weekdays),
        ) {
            Ok(dates) => dates,
            Err(reason) => return Ok(bad_request(reason)),
        };

        return match create_many(&storage, &base, dates).await {
            Ok(response) => {
                info!(
                    "Weekly schedules for class {}: {} created, {} skipped",
                    base.class.id,
                    response.created.len(),
                    response.failed.len()
                );
                if !response.failed.is_empty() {
                    warn!(
                        "Skipped dates for class {}: {:?}",
                        base.class.id,
                        response.failed.iter().map(|f| f.date).collect::<Vec<_>>()
                    );
                }
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(response, "Recurring schedules created")))
            }
            Err(e) => {
                error!("Recurring schedule creation failed: {}", e);
                Ok(crate::models::respond_err(&e))
            }
        };
    }

    let date = match data.schedule_date.as_deref() {
        Some(raw) => match crate::utils::datetime::parse_date(raw) {
            Ok(date) => date,
            Err(e) => return Ok(bad_request(e.to_string())),
        },
        None => return Ok(bad_request("schedule_date is required for a single session")),
    };

    let candidate = base.on_date(date);
    match storage.create_schedule_checked(candidate.clone()).await {
        Ok(ScheduleCheckOutcome::Created(schedule)) => {
            info!("Schedule {} created for class {}", schedule.id, schedule.class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(schedule, "Schedule created")))
        }
        Ok(ScheduleCheckOutcome::Conflicts(conflicts)) => {
            let infos = conflict::describe(&candidate, &conflicts);
            Ok(HttpResponse::Conflict().json(ApiResponse::error(
                "CONFLICT",
                infos,
                "Schedule overlaps an existing session",
            )))
        }
        Err(e) => {
            error!("Schedule creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
