use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::services::authoring::ensure_owns_class;

// Deletion is refused once any attempt exists; archive instead.
pub async fn delete_test(
    service: &TeacherTestService,
    request: &HttpRequest,
    test_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let existing = match storage.get_test(test_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Test {test_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if let Err(response) = ensure_owns_class(&storage, &principal, existing.class_id).await {
        return Ok(response);
    }

    match storage.delete_test(test_id).await {
        Ok(true) => {
            info!("Test {} deleted by {}", test_id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Test deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            "NOT_FOUND",
            format!("Test {test_id} not found"),
        ))),
        Err(e) => {
            error!("Test delete failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
