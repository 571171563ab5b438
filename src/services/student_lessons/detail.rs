use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentLessonService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::entities::{Choice, Item};
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::lessons::entities::Lesson;
use crate::models::lessons::responses::{LessonDetailResponse, StudentChoice, StudentItem};
use crate::storage::Storage;
use crate::utils::datetime::today;

// When a lesson has no authored items, up to this many practice items from
// its part stand in.
const PART_FALLBACK_LIMIT: u64 = 20;

/// Gate order: existence, enrollment, unlock date. Each failure maps to its
/// own status so clients can distinguish "not yours" from "not yet".
pub(super) async fn load_gated_lesson(
    storage: &Arc<dyn Storage>,
    student_id: &str,
    lesson_id: i64,
) -> Result<Lesson, HttpResponse> {
    let lesson = match storage.get_lesson(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Lesson {lesson_id} not found"),
            )));
        }
        Err(e) => return Err(crate::models::respond_err(&e)),
    };

    let enrollments = match storage.list_student_enrollments(student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Err(crate::models::respond_err(&e)),
    };
    let mut enrolled = false;
    for (enrollment, class) in &enrollments {
        if enrollment.status == EnrollmentStatus::Active && class.course_id == lesson.lp_id {
            enrolled = true;
            break;
        }
    }
    if !enrolled {
        return Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "AUTHORIZATION",
            "You are not enrolled in a class of this course",
        )));
    }

    if !lesson.is_unlocked_on(today()) {
        let from = lesson
            .available_from
            .map(|d| d.to_string())
            .unwrap_or_default();
        return Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "LOCKED",
            format!("Lesson unlocks on {from}"),
        )));
    }

    Ok(lesson)
}

pub(super) async fn load_lesson_items(
    storage: &Arc<dyn Storage>,
    lesson: &Lesson,
) -> Result<Vec<(Item, Vec<Choice>)>, crate::errors::LmsError> {
    let items = storage.items_with_choices_for_lesson(lesson.id).await?;
    if !items.is_empty() {
        return Ok(items);
    }
    storage
        .items_with_choices_for_part(lesson.part_id, PART_FALLBACK_LIMIT)
        .await
}

fn strip_answers(items: Vec<(Item, Vec<Choice>)>) -> Vec<StudentItem> {
    items
        .into_iter()
        .map(|(item, choices)| StudentItem {
            id: item.id,
            part_id: item.part_id,
            question_text: item.question_text,
            stimulus_text: item.stimulus_text,
            image_path: item.image_path,
            audio_path: item.audio_path,
            order_in_part: item.order_in_part,
            choices: choices
                .into_iter()
                .map(|choice| StudentChoice {
                    id: choice.id,
                    label: choice.label,
                    content: choice.content,
                })
                .collect(),
        })
        .collect()
}

pub async fn lesson_detail(
    service: &StudentLessonService,
    request: &HttpRequest,
    lesson_id: i64,
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

    let lesson = match load_gated_lesson(&storage, &student_id, lesson_id).await {
        Ok(lesson) => lesson,
        Err(response) => return Ok(response),
    };

    let items = match load_lesson_items(&storage, &lesson).await {
        Ok(items) => items,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let response = LessonDetailResponse {
        lesson,
        items: strip_answers(items),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Lesson retrieved")))
}
