use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScheduleService;
use crate::models::ApiResponse;

pub async fn list_class_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Class {class_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    }

    match storage.list_schedules_by_class(class_id).await {
        Ok(schedules) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(schedules, "Schedules retrieved")))
        }
        Err(e) => {
            error!("Schedule list for class {} failed: {}", class_id, e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
