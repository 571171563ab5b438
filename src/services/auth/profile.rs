use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, auth::responses::ProfileResponse};

use super::AuthService;

pub async fn handle_profile(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireJWT::extract_principal(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            "AUTHENTICATION",
            "Authentication required",
        )));
    };

    let response = ProfileResponse {
        id: principal.id,
        role: principal.role,
        email: principal.email,
        display_name: principal.display_name,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Profile retrieved")))
}
