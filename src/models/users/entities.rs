use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Actor classes of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles allowed to author content.
    pub fn teacher_roles() -> Vec<Role> {
        vec![Role::Teacher, Role::Admin]
    }

    pub fn admin_roles() -> Vec<Role> {
        vec![Role::Admin]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Teacher {
    // T + 8 digits
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Student {
    // S + 8 digits
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub target_score: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The authenticated principal, resolved from either user table (or the
/// admin table) and stashed in request extensions by `RequireJWT`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub display_name: String,
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,
}
