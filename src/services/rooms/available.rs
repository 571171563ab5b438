use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::RoomService;
use crate::models::ApiResponse;
use crate::models::schedules::requests::AvailableRoomsQuery;
use crate::models::schedules::responses::AvailableRoomsResponse;
use crate::utils::datetime::{parse_date, parse_time};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty("VALIDATION", message))
}

// Rooms free for the whole [start, end) window on the given date.
pub async fn find_available_rooms(
    service: &RoomService,
    request: &HttpRequest,
    query: AvailableRoomsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let date = match parse_date(&query.date) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let start_time = match parse_time(&query.start_time) {
        Ok(time) => time,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let end_time = match parse_time(&query.end_time) {
        Ok(time) => time,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    if start_time >= end_time {
        return Ok(bad_request("Start time must be before end time"));
    }

    match storage
        .find_available_rooms(date, start_time, end_time, query.min_capacity)
        .await
    {
        Ok(rooms) => {
            let response = AvailableRoomsResponse {
                date,
                start_time,
                end_time,
                rooms,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Available rooms retrieved")))
        }
        Err(e) => {
            error!("Available-room lookup failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
