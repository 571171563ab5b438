use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::error;

use super::StudentTestService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::entities::TestStatus;
use crate::models::assessments::responses::{StudentTestListResponse, StudentTestSummary};
use crate::models::enrollments::entities::EnrollmentStatus;

/// ACTIVE tests across the student's active classes with attempt usage.
pub async fn list_tests(
    service: &StudentTestService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                "AUTHENTICATION",
                "Authentication required",
            )));
        }
    };

    let enrollments = match storage.list_student_enrollments(&student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let mut class_names: HashMap<i64, String> = HashMap::new();
    let mut class_ids = Vec::new();
    for (enrollment, class) in enrollments {
        if enrollment.status == EnrollmentStatus::Active {
            class_ids.push(class.id);
            class_names.insert(class.id, class.name);
        }
    }

    let tests = match storage.list_tests_by_classes(&class_ids).await {
        Ok(tests) => tests,
        Err(e) => {
            error!("Test list for {} failed: {}", student_id, e);
            return Ok(crate::models::respond_err(&e));
        }
    };

    let mut items = Vec::new();
    for test in tests {
        if test.status != TestStatus::Active {
            continue;
        }
        let used = match storage.count_attempts(test.id, &student_id).await {
            Ok(count) => count as i32,
            Err(e) => return Ok(crate::models::respond_err(&e)),
        };
        let remaining = (test.max_attempts - used).max(0);
        items.push(StudentTestSummary {
            class_name: class_names.get(&test.class_id).cloned().unwrap_or_default(),
            attempts_used: used,
            attempts_remaining: remaining,
            test,
        });
    }

    let response = StudentTestListResponse { items };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Tests retrieved")))
}
