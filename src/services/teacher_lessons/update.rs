use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherLessonService, ensure_owns_course, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::requests::{LessonPatch, UpdateLessonRequest};
use crate::services::authoring::validate_item_payloads;
use crate::utils::datetime::parse_date;
use crate::utils::validate::{MediaKind, validate_media_path};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

// Metadata fields patch individually; a present item set replaces the whole
// question set.
pub async fn update_lesson(
    service: &TeacherLessonService,
    request: &HttpRequest,
    lesson_id: i64,
    data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    // Ownership follows the lesson's own course, never a caller-supplied
    // class id.
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

    if let Some(part_id) = data.part_id {
        match storage.get_part(part_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(bad_request(format!("Part {part_id} does not exist"))),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    }
    if let Some(ref url) = data.video_url
        && let Err(reason) = validate_media_path(MediaKind::Video, url)
    {
        return Ok(bad_request(reason));
    }
    let available_from = match data.available_from.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };

    let specs = match data.items {
        Some(items) => match validate_item_payloads(items) {
            Ok(specs) => Some(specs),
            Err(reason) => return Ok(bad_request(reason)),
        },
        None => None,
    };

    let patch = LessonPatch {
        part_id: data.part_id,
        name: data.name,
        video_url: data.video_url,
        available_from,
    };

    match storage.update_lesson_with_items(lesson_id, patch, specs).await {
        Ok(Some(lesson)) => {
            info!("Lesson {} updated by {}", lesson_id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Lesson {lesson_id} not found"),
        ))),
        Err(e) => {
            error!("Lesson update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
