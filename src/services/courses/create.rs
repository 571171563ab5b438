use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::entities::CourseStatus;
use crate::models::courses::requests::{CreateCourseRequest, NewCourse};
use crate::utils::datetime::parse_date;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course_id = data.course_id.trim().to_string();
    if course_id.is_empty() {
        return Ok(bad_request("Course id is required"));
    }
    if data.name.trim().is_empty() {
        return Ok(bad_request("Course name is required"));
    }

    let status = match data.status.as_deref() {
        Some(raw) => match CourseStatus::parse(raw) {
            Some(status) => status,
            None => return Ok(bad_request(format!("Unknown course status '{raw}'"))),
        },
        None => CourseStatus::Draft,
    };

    let start_date = match data.start_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let end_date = match data.end_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    if let (Some(start), Some(end)) = (start_date, end_date)
        && start > end
    {
        return Ok(bad_request("Course start date must not be after its end date"));
    }

    if let Err(reason) = super::validate_pricing(data.tuition, data.capacity) {
        return Ok(bad_request(reason));
    }

    // A prerequisite must exist and must not be the course itself.
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

    match storage.get_course(&course_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                "CONFLICT",
                format!("Course {course_id} already exists"),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(crate::models::respond_err(&e)),
    }

    let new_course = NewCourse {
        course_id,
        name: data.name.trim().to_string(),
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

    match storage.create_course(new_course).await {
        Ok(course) => {
            info!("Course {} created", course.course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => {
            error!("Course creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
