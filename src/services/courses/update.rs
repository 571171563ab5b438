use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::entities::CourseStatus;
use crate::models::courses::requests::{CoursePatch, UpdateCourseRequest};
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let status = match data.status.as_deref() {
        Some(raw) => match CourseStatus::parse(raw) {
            Some(status) => Some(status),
            None => return Ok(bad_request(format!("Unknown course status '{raw}'"))),
        },
        None => None,
    };

    let start_date = match data.start_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let end_date = match data.end_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };

    if let Err(reason) = super::validate_pricing(data.tuition, data.capacity) {
        return Ok(bad_request(reason));
    }

    if let Some(ref prereq) = data.prerequisite_id {
        if *prereq == course_id {
            return Ok(bad_request("A course cannot be its own prerequisite"));
        }
        match storage.get_course(prereq).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(bad_request(format!("Prerequisite course {prereq} does not exist")));
            }
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    }

    let patch = CoursePatch {
        name: data.name,
        status,
        prerequisite_id: data.prerequisite_id,
        target_score: data.target_score,
        level: data.level,
        start_date,
        end_date,
        tuition: data.tuition,
        capacity: data.capacity,
        learning_path: data.learning_path,
    };

    match storage.update_course(&course_id, patch).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Course {course_id} not found"),
        ))),
        Err(e) => {
            error!("Course update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
