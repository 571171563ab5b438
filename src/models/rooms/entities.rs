use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub enum RoomStatus {
    Available,
    Maintenance,
    Occupied,
    Reserved,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Reserved => "RESERVED",
            RoomStatus::OutOfOrder => "OUT_OF_ORDER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Some(RoomStatus::Available),
            "MAINTENANCE" => Some(RoomStatus::Maintenance),
            "OCCUPIED" => Some(RoomStatus::Occupied),
            "RESERVED" => Some(RoomStatus::Reserved),
            "OUT_OF_ORDER" => Some(RoomStatus::OutOfOrder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/room.ts")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub room_type: Option<String>,
    pub location: Option<String>,
    pub status: RoomStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
