use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScheduleService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::TeacherAvailabilityQuery;
use crate::models::schedules::responses::{DaySchedules, TeacherAvailabilityResponse};
use crate::models::users::entities::Role;
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

/// A teacher's sessions grouped per day over a date or a `[from, to]` range.
///
/// Teachers see their own calendar; admins may name any teacher.
pub async fn teacher_availability(
    service: &ScheduleService,
    request: &HttpRequest,
    query: TeacherAvailabilityQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match RequireJWT::extract_principal(request) {
        Some(principal) => principal,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                "AUTHENTICATION",
                "Authentication required",
            )));
        }
    };

    let teacher_id = match query.teacher_id {
        Some(ref requested) if *requested != principal.id => {
            if principal.role != Role::Admin {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                    "AUTHORIZATION",
                    "Only admins may query another teacher's calendar",
                )));
            }
            requested.clone()
        }
        Some(requested) => requested,
        None => {
            if principal.role != Role::Teacher {
                return Ok(bad_request("teacher_id is required"));
            }
            principal.id.clone()
        }
    };

    let (from, to) = match (&query.date, &query.from, &query.to) {
        (Some(date), None, None) => {
            let day = match parse_date(date) {
                Ok(day) => day,
                Err(e) => return Ok(bad_request(e.to_string())),
            };
            (day, day)
        }
        (None, Some(from), Some(to)) => {
            let from = match parse_date(from) {
                Ok(date) => date,
                Err(e) => return Ok(bad_request(e.to_string())),
            };
            let to = match parse_date(to) {
                Ok(date) => date,
                Err(e) => return Ok(bad_request(e.to_string())),
            };
            if from > to {
                return Ok(bad_request("Range start is after its end"));
            }
            (from, to)
        }
        _ => return Ok(bad_request("Provide either date or both from and to")),
    };

    match storage.list_schedules_for_teacher(&teacher_id, from, to).await {
        Ok(schedules) => {
            let response = TeacherAvailabilityResponse {
                teacher_id,
                days: group_by_day(schedules),
            };
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Teacher availability retrieved")))
        }
        Err(e) => {
            error!("Teacher availability lookup failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}

// Rows arrive ordered by (date, start_time); fold adjacent dates together.
fn group_by_day(schedules: Vec<Schedule>) -> Vec<DaySchedules> {
    let mut days: Vec<DaySchedules> = Vec::new();
    for schedule in schedules {
        match days.last_mut() {
            Some(day) if day.date == schedule.schedule_date => day.schedules.push(schedule),
            _ => days.push(DaySchedules {
                date: schedule.schedule_date,
                schedules: vec![schedule],
            }),
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn schedule(day: u32, hour: u32) -> Schedule {
        Schedule {
            id: (day * 100 + hour) as i64,
            room_id: 1,
            class_id: 1,
            teacher_id: "T00000001".into(),
            schedule_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 2, 0, 0).unwrap(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_group_by_day() {
        let days = group_by_day(vec![
            schedule(6, 9),
            schedule(6, 14),
            schedule(8, 9),
        ]);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].schedules.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
    }

    #[test]
    fn test_group_by_day_empty() {
        assert!(group_by_day(Vec::new()).is_empty());
    }
}
