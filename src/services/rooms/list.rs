use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::RoomService;
use crate::models::ApiResponse;
use crate::models::rooms::requests::RoomQueryParams;

pub async fn list_rooms(
    service: &RoomService,
    request: &HttpRequest,
    query: RoomQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_rooms(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Rooms retrieved"))),
        Err(e) => {
            error!("Room list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
