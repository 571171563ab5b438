use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::responses::CourseDetailResponse;

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_detail(&course_id).await {
        Ok(Some((course, learning_path))) => {
            let response = CourseDetailResponse {
                course,
                learning_path,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Course retrieved")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Course {course_id} not found"),
        ))),
        Err(e) => Ok(crate::models::respond_err(&e)),
    }
}
