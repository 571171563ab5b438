use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherTestService, require_principal};
use crate::models::ApiResponse;
use crate::models::PaginationQuery;
use crate::models::assessments::responses::TestSetupResponse;
use crate::models::classes::requests::ClassQueryParams;
use crate::models::users::entities::Role;

/// Everything the authoring form needs up front: the fixed parts catalog
/// and the classes this teacher may author for.
pub async fn test_setup(
    service: &TeacherTestService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match require_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let parts = match storage.list_parts().await {
        Ok(parts) => parts,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let classes = if principal.role == Role::Admin {
        let query = ClassQueryParams {
            pagination: PaginationQuery {
                page: 1,
                per_page: 100,
            },
            course_id: None,
            status: None,
            ongoing: None,
            available_only: None,
            search: None,
            sort_by: None,
            sort_dir: None,
        };
        match storage.list_classes(query).await {
            Ok(list) => list.items,
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    } else {
        match storage.list_classes_taught_by(&principal.id).await {
            Ok(classes) => classes,
            Err(e) => return Ok(crate::models::respond_err(&e)),
        }
    };

    let response = TestSetupResponse { parts, classes };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Setup data retrieved")))
}
