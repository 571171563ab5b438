use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentLessonService, detail, grading};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::requests::SubmissionRequest;
use crate::models::assessments::responses::SubmissionResultResponse;

/// Grade a practice quiz. Nothing is persisted; students may retry freely.
pub async fn submit_quiz(
    service: &StudentLessonService,
    request: &HttpRequest,
    lesson_id: i64,
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

    let lesson = match detail::load_gated_lesson(&storage, &student_id, lesson_id).await {
        Ok(lesson) => lesson,
        Err(response) => return Ok(response),
    };

    let items = match detail::load_lesson_items(&storage, &lesson).await {
        Ok(items) => items,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if items.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            "VALIDATION",
            "Lesson has no questions to grade",
        )));
    }

    let outcome = grading::grade(&items, &data.responses);
    info!(
        "Quiz on lesson {} by {}: {}/{}",
        lesson_id, student_id, outcome.correct, outcome.total
    );

    let response = SubmissionResultResponse {
        att_id: None,
        answered: outcome.answered,
        correct: outcome.correct,
        total: outcome.total,
        percentage: outcome.percentage,
        score_out_of_10: outcome.score_out_of_10,
        breakdown: outcome.breakdown,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Quiz graded")))
}
