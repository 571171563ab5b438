use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::ApiResponse;
use crate::models::users::requests::UserQueryParams;

pub async fn list_teachers(
    service: &UserService,
    request: &HttpRequest,
    query: UserQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Teachers retrieved"))),
        Err(e) => {
            error!("Teacher list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}

pub async fn list_students(
    service: &UserService,
    request: &HttpRequest,
    query: UserQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Students retrieved"))),
        Err(e) => {
            error!("Student list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
