use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct RoomQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<String>,
    pub min_capacity: Option<i32>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct CreateRoomRequest {
    pub name: String,
    pub capacity: i32,
    pub room_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub room_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

// Storage-facing, already validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub capacity: i32,
    pub room_type: Option<String>,
    pub location: Option<String>,
    pub status: super::entities::RoomStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub room_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<super::entities::RoomStatus>,
}
