use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse,
    auth::{
        requests::LoginRequest,
        responses::{LoginResponse, ProfileResponse},
    },
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

/// One login endpoint for all three account populations; the email decides
/// which table answers.
pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    match storage.find_principal_by_email(&login_request.email).await {
        Ok(Some(principal)) => {
            if !verify_password(&login_request.password, &principal.password_hash) {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    "AUTHENTICATION",
                    "Email or password is incorrect",
                )));
            }

            match JwtUtils::generate_token_pair(&principal.id, principal.role.as_str()) {
                Ok(token_pair) => {
                    tracing::info!("User {} logged in", principal.id);

                    let response = LoginResponse {
                        access_token: token_pair.access_token,
                        token_type: "Bearer".to_string(),
                        expires_in: config.jwt.access_token_expiry * 60,
                        user: ProfileResponse {
                            id: principal.id,
                            role: principal.role,
                            email: principal.email,
                            display_name: principal.display_name,
                        },
                    };

                    let refresh_cookie =
                        JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                    Ok(HttpResponse::Ok()
                        .cookie(refresh_cookie)
                        .json(ApiResponse::success(response, "Login successful")))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                            "INTERNAL",
                            "Login failed, unable to generate token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            "AUTHENTICATION",
            "Email or password is incorrect",
        ))),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}

pub async fn handle_logout(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out")))
}
