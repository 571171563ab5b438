use std::collections::HashMap;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::LmsError;

// Uniform API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            timestamp: chrono::Utc::now(),
            error_code: None,
            validation_errors: None,
            meta: None,
        }
    }

    pub fn success_with_meta(
        data: T,
        message: impl Into<String>,
        meta: serde_json::Value,
    ) -> Self {
        Self {
            meta: Some(meta),
            ..Self::success(data, message)
        }
    }

    pub fn error(code: impl Into<String>, data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Some(data),
            timestamp: chrono::Utc::now(),
            error_code: Some(code.into()),
            validation_errors: None,
            meta: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            timestamp: chrono::Utc::now(),
            error_code: None,
            validation_errors: None,
            meta: None,
        }
    }

    pub fn error_empty(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            timestamp: chrono::Utc::now(),
            error_code: Some(code.into()),
            validation_errors: None,
            meta: None,
        }
    }

    pub fn validation(errors: HashMap<String, String>, message: impl Into<String>) -> Self {
        Self {
            validation_errors: Some(errors),
            ..Self::error_empty("VALIDATION", message)
        }
    }
}

/// Map a core error to its HTTP response, 1:1 per the error kind.
pub fn respond_err(err: &LmsError) -> HttpResponse {
    HttpResponse::build(err.http_status()).json(ApiResponse::<()>::error_empty(
        err.error_token(),
        err.message(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(5i64, "ok");
        assert!(resp.success);
        assert!(resp.error_code.is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"], 5);
        assert!(json.get("validation_errors").is_none());
    }

    #[test]
    fn test_error_envelope_carries_code() {
        let resp = ApiResponse::<()>::error_empty("CONFLICT", "Schedule overlaps");
        assert!(!resp.success);
        assert_eq!(resp.error_code.as_deref(), Some("CONFLICT"));
    }
}
