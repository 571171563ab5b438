use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{TeacherTestService, aggregate, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::responses::ScoreboardResponse;
use crate::services::authoring::ensure_owns_class;

pub async fn scoreboard(
    service: &TeacherTestService,
    request: &HttpRequest,
    test_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
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
    if let Err(response) = ensure_owns_class(&storage, &principal, test.class_id).await {
        return Ok(response);
    }

    let attempts = match storage.list_attempts_for_test(test_id).await {
        Ok(attempts) => attempts,
        Err(e) => {
            error!("Attempt list for test {} failed: {}", test_id, e);
            return Ok(crate::models::respond_err(&e));
        }
    };

    let total_questions = if test.total_questions > 0 {
        test.total_questions
    } else {
        match storage.count_items_for_test(test_id).await {
            Ok(live) => aggregate::effective_total(test.total_questions, live),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    };

    let student_ids: Vec<String> = {
        let mut ids: Vec<String> = attempts.iter().map(|a| a.student_id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    };
    let names = match storage.student_names(&student_ids).await {
        Ok(names) => names,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    let statuses = match storage.enrollment_status_map(test.class_id).await {
        Ok(statuses) => statuses,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let rows = aggregate::aggregate(&attempts, total_questions, &names, &statuses);

    let response = ScoreboardResponse {
        test_id: test.id,
        test_name: test.name,
        class_id: test.class_id,
        total_questions,
        rows,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Scoreboard retrieved")))
}
