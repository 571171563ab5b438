use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherLessonService, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::requests::{CreateLessonRequest, NewLesson};
use crate::models::courses::entities::LearningPath;
use crate::services::authoring::{ensure_owns_class, validate_item_payloads};
use crate::utils::datetime::parse_date;
use crate::utils::validate::{MediaKind, validate_media_path};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_lesson(
    service: &TeacherLessonService,
    request: &HttpRequest,
    data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_owns_class(&storage, &principal, data.class_id).await {
        return Ok(response);
    }

    // The lesson attaches to the course's learning path, not the class.
    let course_id = match storage.get_class_with_course(data.class_id).await {
        Ok(Some((_, course))) => course.course_id,
        Ok(None) => {
            return Ok(bad_request(format!("Class {} does not exist", data.class_id)));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    let lp_id = match storage.get_course_detail(&course_id).await {
        Ok(Some((_, path))) => match lesson_path_for(&course_id, path) {
            Ok(lp_id) => lp_id,
            Err(reason) => return Ok(bad_request(reason)),
        },
        Ok(None) => {
            return Ok(bad_request(format!("Course {course_id} does not exist")));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    if data.name.trim().is_empty() {
        return Ok(bad_request("Lesson name is required"));
    }
    match storage.get_part(data.part_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(bad_request(format!("Part {} does not exist", data.part_id))),
        Err(e) => return Ok(crate::models::respond_err(&e)),
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

    let specs = match validate_item_payloads(data.items) {
        Ok(specs) => specs,
        Err(reason) => return Ok(bad_request(reason)),
    };
    for spec in &specs {
        if spec.part_id != data.part_id {
            return Ok(bad_request("All items must belong to the lesson's part"));
        }
    }

    let new_lesson = NewLesson {
        lp_id,
        part_id: data.part_id,
        name: data.name.trim().to_string(),
        video_url: data.video_url,
        available_from,
    };

    match storage.create_lesson_with_items(new_lesson, specs).await {
        Ok(lesson) => {
            info!("Lesson {} created by {}", lesson.id, principal.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created")))
        }
        Err(e) => {
            error!("Lesson creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}

/// A course without a learning path cannot host lessons.
fn lesson_path_for(course_id: &str, path: Option<LearningPath>) -> Result<String, String> {
    match path {
        Some(path) => Ok(path.course_id),
        None => Err(format!("Course {course_id} has no learning path")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_rejected_without_learning_path() {
        assert!(lesson_path_for("TOEIC500", None).is_err());

        let path = LearningPath {
            course_id: "TOEIC500".to_string(),
            title: "TOEIC 500 Roadmap".to_string(),
            objective: None,
            description: None,
        };
        assert_eq!(
            lesson_path_for("TOEIC500", Some(path)).as_deref(),
            Ok("TOEIC500")
        );
    }
}
