use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::RoomService;
use crate::models::ApiResponse;

pub async fn delete_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_room(room_id).await {
        Ok(true) => {
            info!("Room {} deleted", room_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Room deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Room {room_id} not found"),
        ))),
        Err(e) => {
            error!("Room delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
