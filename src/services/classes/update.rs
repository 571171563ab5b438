use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::entities::ClassStatus;
use crate::models::classes::requests::{ClassPatch, UpdateClassRequest};
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let start_date = match data.start_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let end_date = match data.end_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    if let (Some(start), Some(end)) = (start_date, end_date)
        && start > end
    {
        return Ok(bad_request("Class start date must not be after its end date"));
    }
    if let Some(max) = data.max_students
        && max <= 0
    {
        return Ok(bad_request("Maximum students must be positive"));
    }

    let status = match data.status.as_deref() {
        Some(raw) => match ClassStatus::parse(raw) {
            Some(status) => Some(status),
            None => return Ok(bad_request(format!("Unknown class status '{raw}'"))),
        },
        None => None,
    };

    let patch = ClassPatch {
        name: data.name,
        start_date,
        end_date,
        max_students: data.max_students,
        status,
    };

    match storage.update_class(class_id, patch).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Class {class_id} not found"),
        ))),
        Err(e) => {
            error!("Class update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
