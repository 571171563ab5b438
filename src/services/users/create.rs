use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::ApiResponse;
use crate::models::users::requests::{CreateStudentRequest, CreateTeacherRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

/// Shared account validation: email shape, password policy, email uniqueness
/// across all three populations.
async fn check_account_fields(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
    password: &str,
) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_email(email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_empty("VALIDATION", msg)));
    }

    if let Err(msg) = validate_password_simple(password) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_empty("VALIDATION", msg)));
    }

    match storage.email_in_use(email).await {
        Ok(true) => Err(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
            "CONFLICT",
            "Email is already registered",
        ))),
        Ok(false) => Ok(()),
        Err(e) => {
            error!("Email lookup failed: {}", e);
            Err(crate::models::respond_err(&e))
        }
    }
}

pub async fn create_teacher(
    service: &UserService,
    request: &HttpRequest,
    data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_account_fields(&storage, &data.email, &data.password).await {
        return Ok(resp);
    }

    let password_hash = match hash_password(&data.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(crate::models::respond_err(&e));
        }
    };

    match storage.create_teacher(data, password_hash).await {
        Ok(teacher) => {
            info!("Teacher account {} created", teacher.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Teacher created")))
        }
        Err(e) => {
            error!("Teacher creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}

pub async fn create_student(
    service: &UserService,
    request: &HttpRequest,
    data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_account_fields(&storage, &data.email, &data.password).await {
        return Ok(resp);
    }

    let password_hash = match hash_password(&data.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(crate::models::respond_err(&e));
        }
    };

    match storage.create_student(data, password_hash).await {
        Ok(student) => {
            info!("Student account {} created", student.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student created")))
        }
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(crate::models::respond_err(&e))
        }
    }
}
