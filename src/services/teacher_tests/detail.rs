use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::responses::{ItemWithChoices, TestDetailResponse};
use crate::services::authoring::ensure_owns_class;

pub async fn test_detail(
    service: &TeacherTestService,
    request: &HttpRequest,
    test_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let test = match storage.get_test(test_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Test {test_id} not found"),
            )));
        }
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };
    if let Err(response) = ensure_owns_class(&storage, &principal, test.class_id).await {
        return Ok(response);
    }

    let items = match storage.items_with_choices_for_test(test_id).await {
        Ok(items) => items,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let response = TestDetailResponse {
        test,
        items: items
            .into_iter()
            .map(|(item, choices)| ItemWithChoices { item, choices })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Test retrieved")))
}
