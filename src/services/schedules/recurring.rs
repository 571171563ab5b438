use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ScheduleService, create};
use crate::models::ApiResponse;
use crate::models::schedules::requests::RecurringScheduleRequest;
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_recurring(
    service: &ScheduleService,
    request: &HttpRequest,
    data: RecurringScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let base = match create::validate_base(&storage, &data.base_data).await {
        Ok(base) => base,
        Err(response) => return Ok(response),
    };

    // The series starts at base_data.schedule_date (default: class start).
    let from = match data.base_data.schedule_date.as_deref() {
        Some(raw) => match parse_date(raw) {
            Ok(date) => date,
            Err(e) => return Ok(bad_request(e.to_string())),
        },
        None => base.class.start_date,
    };
    let to = match parse_date(&data.end_date) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };

    let weekdays = data
        .weekdays
        .as_deref()
        .or(data.base_data.weekdays.as_deref());
    let dates = match super::recurrence::expand(data.recurrence_type, from, to, weekdays) {
        Ok(dates) => dates,
        Err(reason) => return Ok(bad_request(reason)),
    };
    if dates.is_empty() {
        return Ok(bad_request("Recurrence expands to no dates"));
    }

    match create::create_many(&storage, &base, dates).await {
        Ok(response) => {
            info!(
                "Recurring schedules for class {}: {} created, {} skipped",
                base.class.id,
                response.created.len(),
                response.failed.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Recurring schedules created")))
        }
        Err(e) => {
            error!("Recurring schedule creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
