use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::entities::{DEFAULT_MAX_ATTEMPTS, TestStatus};
use crate::models::assessments::requests::{CreateTestRequest, NewTest};
use crate::services::authoring::{ensure_owns_class, validate_item_payloads};
use crate::utils::datetime::parse_date_or_datetime;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_test(
    service: &TeacherTestService,
    request: &HttpRequest,
    data: CreateTestRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_owns_class(&storage, &principal, data.class_id).await {
        return Ok(response);
    }

    if data.test_name.trim().is_empty() {
        return Ok(bad_request("Test name is required"));
    }
    let status = match data.status.as_deref() {
        Some(raw) => match TestStatus::parse(raw) {
            Some(status) => status,
            None => return Ok(bad_request(format!("Unknown test status '{raw}'"))),
        },
        None => TestStatus::Inactive,
    };
    let available_from = match data
        .available_from
        .as_deref()
        .map(parse_date_or_datetime)
        .transpose()
    {
        Ok(value) => value,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let due_at = match data.due_at.as_deref().map(parse_date_or_datetime).transpose() {
        Ok(value) => value,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    if let (Some(from), Some(due)) = (available_from, due_at)
        && from >= due
    {
        return Ok(bad_request("Test must open before it is due"));
    }
    let max_attempts = data.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
    if max_attempts <= 0 {
        return Ok(bad_request("Maximum attempts must be positive"));
    }
    if let Some(limit) = data.time_limit_minutes
        && limit <= 0
    {
        return Ok(bad_request("Time limit must be positive"));
    }

    let specs = match validate_item_payloads(data.items) {
        Ok(specs) => specs,
        Err(reason) => return Ok(bad_request(reason)),
    };
    for spec in &specs {
        match storage.get_part(spec.part_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(bad_request(format!("Part {} does not exist", spec.part_id))),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    }

    let new_test = NewTest {
        class_id: data.class_id,
        teacher_id: principal.id.clone(),
        name: data.test_name.trim().to_string(),
        status,
        available_from,
        due_at,
        max_attempts,
        time_limit_minutes: data.time_limit_minutes,
    };

    match storage.create_test_with_items(new_test, specs).await {
        Ok(test) => {
            info!("Test {} created by {}", test.id, principal.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(test, "Test created")))
        }
        Err(e) => {
            error!("Test creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
