use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::requests::CourseQueryParams;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Courses retrieved"))),
        Err(e) => {
            error!("Course list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
