use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::RoomService;
use crate::models::ApiResponse;
use crate::models::rooms::entities::RoomStatus;
use crate::models::rooms::requests::{CreateRoomRequest, NewRoom};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

pub async fn create_room(
    service: &RoomService,
    request: &HttpRequest,
    data: CreateRoomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if data.name.trim().is_empty() {
        return Ok(bad_request("Room name is required"));
    }
    if data.capacity <= 0 {
        return Ok(bad_request("Room capacity must be positive"));
    }

    let status = match data.status.as_deref() {
        Some(raw) => match RoomStatus::parse(raw) {
            Some(status) => status,
            None => return Ok(bad_request(format!("Unknown room status '{raw}'"))),
        },
        None => RoomStatus::Available,
    };

    let new_room = NewRoom {
        name: data.name.trim().to_string(),
        capacity: data.capacity,
        room_type: data.room_type,
        location: data.location,
        status,
    };

    match storage.create_room(new_room).await {
        Ok(room) => {
            info!("Room {} ({}) created", room.id, room.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(room, "Room created")))
        }
        Err(e) => {
            error!("Room creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
