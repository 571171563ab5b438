use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::Role;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String, // always "Bearer"
    pub expires_in: i64,    // seconds
    pub user: ProfileResponse,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ProfileResponse {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
