use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherLessonService, ensure_owns_course, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::responses::ItemWithChoices;
use crate::models::lessons::entities::Lesson;
use serde::Serialize;
use ts_rs::TS;

// Teacher view keeps the correct flags so the authoring form can round-trip.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct TeacherLessonDetail {
    pub lesson: Lesson,
    pub items: Vec<ItemWithChoices>,
}

pub async fn lesson_detail(
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

    let items = match storage.items_with_choices_for_lesson(lesson_id).await {
        Ok(items) => items,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let response = TeacherLessonDetail {
        lesson,
        items: items
            .into_iter()
            .map(|(item, choices)| ItemWithChoices { item, choices })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Lesson retrieved")))
}
