pub mod available;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::rooms::requests::{CreateRoomRequest, RoomQueryParams, UpdateRoomRequest};
use crate::models::schedules::requests::AvailableRoomsQuery;
use crate::storage::Storage;

pub struct RoomService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoomService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_room(
        &self,
        request: &HttpRequest,
        data: CreateRoomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_room(self, request, data).await
    }

    pub async fn get_room(&self, request: &HttpRequest, room_id: i64) -> ActixResult<HttpResponse> {
        get::get_room(self, request, room_id).await
    }

    pub async fn list_rooms(
        &self,
        request: &HttpRequest,
        query: RoomQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_rooms(self, request, query).await
    }

    pub async fn update_room(
        &self,
        request: &HttpRequest,
        room_id: i64,
        data: UpdateRoomRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_room(self, request, room_id, data).await
    }

    pub async fn delete_room(
        &self,
        request: &HttpRequest,
        room_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_room(self, request, room_id).await
    }

    pub async fn find_available_rooms(
        &self,
        request: &HttpRequest,
        query: AvailableRoomsQuery,
    ) -> ActixResult<HttpResponse> {
        available::find_available_rooms(self, request, query).await
    }
}
