use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::models::assessments::responses::TestListResponse;
use crate::services::authoring::ensure_owns_class;

/// Tests across the teacher's classes, or a single class when named.
pub async fn list_tests(
    service: &TeacherTestService,
    request: &HttpRequest,
    class_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let class_ids = match class_id {
        Some(class_id) => {
            if let Err(response) = ensure_owns_class(&storage, &principal, class_id).await {
                return Ok(response);
            }
            vec![class_id]
        }
        None => match storage.list_classes_taught_by(&principal.id).await {
            Ok(classes) => classes.into_iter().map(|class| class.id).collect(),
            Err(e) => return Ok(crate::models::respond_err(&e)),
        },
    };

    match storage.list_tests_by_classes(&class_ids).await {
        Ok(tests) => {
            let response = TestListResponse { items: tests };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Tests retrieved")))
        }
        Err(e) => {
            error!("Test list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
