//! Unified error handling.
//!
//! A macro generates the error enum together with stable codes and type
//! names, plus snake_case convenience constructors.

use std::fmt;

use actix_web::http::StatusCode;

macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $token:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }

            /// Stable machine-readable token for the response envelope.
            pub fn error_token(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $token,)*
                }
            }

            /// HTTP status the error maps to at the API boundary.
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(LmsError::$variant(_) => StatusCode::$status,)*
                }
            }
        }

        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    Validation("E001", "Validation Error", "VALIDATION", BAD_REQUEST),
    NotFound("E002", "Resource Not Found", "NOT_FOUND", NOT_FOUND),
    Permission("E003", "Permission Denied", "PERMISSION", FORBIDDEN),
    Locked("E004", "Resource Locked", "LOCKED", FORBIDDEN),
    Conflict("E005", "Conflict", "CONFLICT", CONFLICT),
    Integrity("E006", "Integrity Error", "INTEGRITY", INTERNAL_SERVER_ERROR),
    Authentication("E007", "Authentication Error", "AUTHENTICATION", UNAUTHORIZED),
    Authorization("E008", "Authorization Error", "AUTHORIZATION", FORBIDDEN),
    DatabaseConfig("E009", "Database Configuration Error", "INTERNAL", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E010", "Database Connection Error", "INTERNAL", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E011", "Database Operation Error", "INTERNAL", INTERNAL_SERVER_ERROR),
    Serialization("E012", "Serialization Error", "INTERNAL", INTERNAL_SERVER_ERROR),
    DateParse("E013", "Date Parse Error", "VALIDATION", BAD_REQUEST),
    Internal("E014", "Internal Error", "INTERNAL", INTERNAL_SERVER_ERROR),
}

impl LmsError {
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        let msg = err.to_string();
        // Unique violations are contended writes, not outages.
        if msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
        {
            LmsError::Conflict(msg)
        } else {
            LmsError::DatabaseOperation(msg)
        }
    }
}

impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        LmsError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LmsError {
    fn from(err: chrono::ParseError) -> Self {
        LmsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::validation("test").code(), "E001");
        assert_eq!(LmsError::conflict("test").code(), "E005");
        assert_eq!(LmsError::authentication("test").code(), "E007");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(LmsError::validation("x").http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(LmsError::not_found("x").http_status(), StatusCode::NOT_FOUND);
        assert_eq!(LmsError::permission("x").http_status(), StatusCode::FORBIDDEN);
        assert_eq!(LmsError::locked("x").http_status(), StatusCode::FORBIDDEN);
        assert_eq!(LmsError::conflict("x").http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_db_err_unique_violation_is_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: schedules".into());
        assert_eq!(LmsError::from(err).code(), "E005");
        let err = sea_orm::DbErr::Custom("connection refused".into());
        assert_eq!(LmsError::from(err).code(), "E011");
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::validation("Invalid interval");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid interval"));
    }
}
