use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ScheduleService;
use crate::models::ApiResponse;

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_schedule(schedule_id).await {
        Ok(true) => {
            info!("Schedule {} deleted", schedule_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Schedule deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Schedule {schedule_id} not found"),
        ))),
        Err(e) => {
            error!("Schedule delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
