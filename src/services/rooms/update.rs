use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::RoomService;
use crate::models::ApiResponse;
use crate::models::rooms::entities::RoomStatus;
use crate::models::rooms::requests::{RoomPatch, UpdateRoomRequest};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn update_room(
    service: &RoomService,
    request: &HttpRequest,
    room_id: i64,
    data: UpdateRoomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(capacity) = data.capacity
        && capacity <= 0
    {
        return Ok(bad_request("Room capacity must be positive"));
    }

    let status = match data.status.as_deref() {
        Some(raw) => match RoomStatus::parse(raw) {
            Some(status) => Some(status),
            None => return Ok(bad_request(format!("Unknown room status '{raw}'"))),
        },
        None => None,
    };

    let patch = RoomPatch {
        name: data.name,
        capacity: data.capacity,
        room_type: data.room_type,
        location: data.location,
        status,
    };

    match storage.update_room(room_id, patch).await {
        Ok(Some(room)) => {
            info!("Room {} updated", room_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(room, "Room updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Room {room_id} not found"),
        ))),
        Err(e) => {
            error!("Room update failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
