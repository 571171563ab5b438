use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::ApiResponse;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Class deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Class {class_id} not found"),
        ))),
        Err(e) => {
            error!("Class delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
