use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::entities::TestStatus;
use crate::models::assessments::requests::{TestPatch, UpdateTestRequest};
use crate::services::authoring::{ensure_owns_class, validate_item_payloads};
use crate::utils::datetime::parse_date_or_datetime;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn update_test(
    service: &TeacherTestService,
    request: &HttpRequest,
    test_id: i64,
    data: UpdateTestRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let existing = match storage.get_test(test_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Test {test_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if let Err(response) = ensure_owns_class(&storage, &principal, existing.class_id).await {
        return Ok(response);
    }

    let status = match data.status.as_deref() {
        Some(raw) => match TestStatus::parse(raw) {
            Some(status) => Some(status),
            None => return Ok(bad_request(format!("Unknown test status '{raw}'"))),
        },
        None => None,
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
    if let (Some(from), Some(due)) = (
        available_from.or(existing.available_from),
        due_at.or(existing.due_at),
    ) && from >= due
    {
        return Ok(bad_request("Test must open before it is due"));
    }
    if let Some(max) = data.max_attempts
        && max <= 0
    {
        return Ok(bad_request("Maximum attempts must be positive"));
    }
    if let Some(limit) = data.time_limit_minutes
        && limit <= 0
    {
        return Ok(bad_request("Time limit must be positive"));
    }

    let specs = match data.items {
        Some(items) => match validate_item_payloads(items) {
            Ok(specs) => Some(specs),
            Err(reason) => return Ok(bad_request(reason)),
        },
        None => None,
    };
    if let Some(ref specs) = specs {
        for spec in specs {
            match storage.get_part(spec.part_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(bad_request(format!("Part {} does not exist", spec.part_id)));
                }
                Err(e) => return Ok(crate::models::respond_err(&e)),
            }
        }
    }

    let patch = TestPatch {
        name: data.test_name,
        status,
        available_from,
        due_at,
        max_attempts: data.max_attempts,
        time_limit_minutes: data.time_limit_minutes,
    };

    match storage.update_test_with_items(test_id, patch, specs).await {
        Ok(Some(test)) => {
            info!("Test {} updated by {}", test_id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(test, "Test updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Test {test_id} not found"),
        ))),
        Err(e) => {
            error!("Test update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
