use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentTestService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::entities::{ResponsesBlob, TestStatus};
use crate::models::assessments::requests::{NewAttempt, SubmissionRequest};
use crate::models::assessments::responses::SubmissionResultResponse;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::services::student_lessons::grading;

/// Grade a test submission and append the attempt record.
///
/// Gate order: existence, enrollment, test status, time window, attempt
/// budget. The attempt row is immutable once written.
pub async fn submit_test(
    service: &StudentTestService,
    request: &HttpRequest,
    test_id: i64,
    data: SubmissionRequest,
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

    let test = match storage.get_test(test_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Test {test_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    match storage.get_enrollment(&student_id, test.class_id).await {
        Ok(Some(enrollment)) if enrollment.status == EnrollmentStatus::Active => {}
        Ok(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                "AUTHORIZATION",
                "You are not enrolled in this test's class",
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    }

    if test.status != TestStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "AUTHORIZATION",
            "Test is not open for submissions",
        )));
    }

    let now = chrono::Utc::now();
    let now_naive = now.naive_utc();
    if let Some(from) = test.available_from
        && now_naive < from
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "LOCKED",
            format!("Test opens at {from}"),
        )));
    }
    if let Some(due) = test.due_at
        && now_naive > due
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "LOCKED",
            format!("Test closed at {due}"),
        )));
    }

    let used = match storage.count_attempts(test_id, &student_id).await {
        Ok(count) => count,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if used >= i64::from(test.max_attempts) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
            "CONFLICT",
            "No attempts remaining for this test",
        )));
    }

    let items = match storage.items_with_choices_for_test(test_id).await {
        Ok(items) => items,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if items.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            "VALIDATION",
            "Test has no questions to grade",
        )));
    }

    let outcome = grading::grade(&items, &data.responses);

    let blob = ResponsesBlob {
        version: 1,
        correct_count: outcome.correct,
        percentage: outcome.percentage,
        per_item: outcome.breakdown.clone(),
    };
    let responses_json = match serde_json::to_string(&blob) {
        Ok(json) => json,
        Err(e) => {
            error!("Responses blob serialization failed: {}", e);
            return Ok(crate::models::respond_err(
                &crate::errors::LmsError::serialization(e.to_string()),
            ));
        }
    };

    let attempt = NewAttempt {
        test_id,
        student_id: student_id.clone(),
        class_id: test.class_id,
        started_at: Some(now),
        submitted_at: Some(now),
        raw_score: Some(outcome.correct),
        status: "submitted".to_string(),
        responses_json: Some(responses_json),
    };

    match storage.insert_attempt(attempt).await {
        Ok(saved) => {
            info!(
                "Attempt {} on test {} by {}: {}/{}",
                saved.att_id, test_id, student_id, outcome.correct, outcome.total
            );
            let response = SubmissionResultResponse {
                att_id: Some(saved.att_id),
                answered: outcome.answered,
                correct: outcome.correct,
                total: outcome.total,
                percentage: outcome.percentage,
                score_out_of_10: outcome.score_out_of_10,
                breakdown: outcome.breakdown,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "Test graded")))
        }
        Err(e) => {
            error!("Attempt insert failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
