use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherLessonService, ensure_owns_course, require_principal};
use crate::models::ApiResponse;

pub async fn delete_lesson(
    service: &TeacherLessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let lesson = match storage.get_lesson(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Lesson {lesson_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if let Err(response) = ensure_owns_course(&storage, &principal, &lesson.lp_id).await {
        return Ok(response);
    }

    match storage.delete_lesson(lesson_id).await {
        Ok(true) => {
            info!("Lesson {} deleted by {}", lesson_id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Lesson deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Lesson {lesson_id} not found"),
        ))),
        Err(e) => {
            error!("Lesson delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
