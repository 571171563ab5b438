use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::entities::ClassStatus;
use crate::models::classes::requests::{CreateClassRequest, NewClass};
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if data.name.trim().is_empty() {
        return Ok(bad_request("Class name is required"));
    }

    let start_date = match parse_date(&data.start_date) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let end_date = match parse_date(&data.end_date) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    if start_date > end_date {
        return Ok(bad_request("Class start date must not be after its end date"));
    }
    if let Some(max) = data.max_students
        && max <= 0
    {
        return Ok(bad_request("Maximum students must be positive"));
    }

    let status = match data.status.as_deref() {
        Some(raw) => match ClassStatus::parse(raw) {
            Some(status) => status,
            None => return Ok(bad_request(format!("Unknown class status '{raw}'"))),
        },
        None => ClassStatus::Active,
    };

    match storage.get_course(&data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(bad_request(format!("Course {} does not exist", data.course_id)));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    }

    let new_class = NewClass {
        course_id: data.course_id,
        name: data.name.trim().to_string(),
        start_date,
        end_date,
        max_students: data.max_students,
        status,
    };

    match storage.create_class(new_class).await {
        Ok(class) => {
            info!("Class {} created in course {}", class.id, class.course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created")))
        }
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
