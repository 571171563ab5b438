use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::rooms::requests::{CreateRoomRequest, RoomQueryParams, UpdateRoomRequest};
use crate::models::schedules::requests::AvailableRoomsQuery;
use crate::models::users::entities::Role;
use crate::services::RoomService;
use crate::utils::SafeRoomIdI64;

static ROOM_SERVICE: Lazy<RoomService> = Lazy::new(RoomService::new_lazy);

pub async fn list_rooms(
    req: HttpRequest,
    query: web::Query<RoomQueryParams>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.list_rooms(&req, query.into_inner()).await
}

pub async fn create_room(
    req: HttpRequest,
    data: web::Json<CreateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.create_room(&req, data.into_inner()).await
}

pub async fn available_rooms(
    req: HttpRequest,
    query: web::Query<AvailableRoomsQuery>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .find_available_rooms(&req, query.into_inner())
        .await
}

pub async fn get_room(req: HttpRequest, room_id: SafeRoomIdI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.get_room(&req, room_id.0).await
}

pub async fn update_room(
    req: HttpRequest,
    room_id: SafeRoomIdI64,
    data: web::Json<UpdateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .update_room(&req, room_id.0, data.into_inner())
        .await
}

pub async fn delete_room(req: HttpRequest, room_id: SafeRoomIdI64) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.delete_room(&req, room_id.0).await
}

pub fn configure_rooms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/rooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_rooms))
                    .route(
                        web::post()
                            .to(create_room)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            )
            // Must precede the id matcher.
            .service(
                web::resource("/available").route(
                    web::get()
                        .to(available_rooms)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{room_id}")
                    .route(web::get().to(get_room))
                    .route(
                        web::put()
                            .to(update_room)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_room)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
