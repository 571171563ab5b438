use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoomService;
use crate::models::ApiResponse;

pub async fn get_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_room(room_id).await {
        Ok(Some(room)) => Ok(HttpResponse::Ok().json(ApiResponse::success(room, "Room retrieved"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Room {room_id} not found"),
        ))),
        Err(e) => Ok(crate::models::respond_err(&e)),
    }
}
