use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::ClassQueryParams;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref sort_by) = query.sort_by
        && !matches!(sort_by.as_str(), "name" | "start_date")
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            "VALIDATION",
            format!("Cannot sort classes by '{sort_by}'"),
        )));
    }

    match storage.list_classes(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Classes retrieved"))),
        Err(e) => {
            error!("Class list failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
