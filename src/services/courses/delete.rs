use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::ApiResponse;

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_course(&course_id).await {
        Ok(true) => {
            info!("Course {} deleted", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Course deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Course {course_id} not found"),
        ))),
        Err(e) => {
            error!("Course delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
