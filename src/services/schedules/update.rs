use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ScheduleService, conflict};
use crate::models::ApiResponse;
use crate::models::schedules::requests::{NewSchedule, UpdateScheduleRequest};
use crate::storage::ScheduleCheckOutcome;
use crate::utils::datetime::{parse_date, parse_time};
use crate::utils::validate::validate_user_id;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

// Merge the patch over the stored row, then re-run the conflict check with
// the row itself excluded.
pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    data: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_schedule(schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Schedule {schedule_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let teacher_id = match data.user_id {
        Some(user_id) => {
            if validate_user_id(&user_id).is_err() || !user_id.starts_with('T') {
                return Ok(bad_request("A valid teacher id is required"));
            }
            match storage.get_teacher_by_id(&user_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(bad_request(format!("Teacher {user_id} does not exist")));
                }
                Err(e) => return Ok(crate::models::respond_err(&e)),
            }
            user_id
        }
        None => existing.teacher_id.clone(),
    };

    if let Some(room_id) = data.room_id
        && room_id != existing.room_id
    {
        match storage.get_room(room_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(bad_request(format!("Room {room_id} does not exist"))),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    }
    if let Some(class_id) = data.class_id
        && class_id != existing.class_id
    {
        match storage.get_class(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(bad_request(format!("Class {class_id} does not exist"))),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    }

    let schedule_date = match data.schedule_date.as_deref() {
        Some(raw) => match parse_date(raw) {
            Ok(date) => date,
            Err(e) => return Ok(bad_request(e.to_string())),
        },
        None => existing.schedule_date,
    };
    let start_time = match data.start_time.as_deref() {
        Some(raw) => match parse_time(raw) {
            Ok(time) => time,
            Err(e) => return Ok(bad_request(e.to_string())),
        },
        None => existing.start_time,
    };
    let end_time = match data.end_time.as_deref() {
        Some(raw) => match parse_time(raw) {
            Ok(time) => time,
            Err(e) => return Ok(bad_request(e.to_string())),
        },
        None => existing.end_time,
    };
    if start_time >= end_time {
        return Ok(bad_request("Start time must be before end time"));
    }

    let candidate = NewSchedule {
        room_id: data.room_id.unwrap_or(existing.room_id),
        class_id: data.class_id.unwrap_or(existing.class_id),
        teacher_id,
        schedule_date,
        start_time,
        end_time,
    };

    match storage
        .update_schedule_checked(schedule_id, candidate.clone())
        .await
    {
        Ok(Some(ScheduleCheckOutcome::Created(schedule))) => {
            info!("Schedule {} updated", schedule_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(schedule, "Schedule updated")))
        }
        Ok(Some(ScheduleCheckOutcome::Conflicts(conflicts))) => {
            let infos = conflict::describe(&candidate, &conflicts);
            Ok(HttpResponse::Conflict().json(ApiResponse::error(
                "CONFLICT",
                infos,
                "Updated schedule would overlap an existing session",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Schedule {schedule_id} not found"),
        ))),
        Err(e) => {
            error!("Schedule update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
