use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::EnrollRequest;
use crate::models::classes::responses::EnrollmentResponse;
use crate::utils::validate::validate_user_id;

pub async fn enroll_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    data: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if validate_user_id(&data.student_id).is_err() || !data.student_id.starts_with('S') {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            "VALIDATION",
            "A valid student id is required",
        )));
    }

    match storage.enroll_student(&data.student_id, class_id).await {
        Ok((enrollment, class)) => {
            info!("Student {} enrolled into class {}", data.student_id, class_id);
            let response = EnrollmentResponse { enrollment, class };
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "Student enrolled")))
        }
        Err(e) => {
            error!(
                "Enrollment of {} into class {} refused: {}",
                data.student_id, class_id, e
            );
            Ok(crate::models::respond_err(&e))
        }
    }
}

pub async fn unenroll_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    data: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.unenroll_student(&data.student_id, class_id).await {
        Ok((enrollment, class)) => {
            info!("Student {} dropped from class {}", data.student_id, class_id);
            let response = EnrollmentResponse { enrollment, class };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Student unenrolled")))
        }
        Err(e) => {
            error!(
                "Unenroll of {} from class {} failed: {}",
                data.student_id, class_id, e
            );
            Ok(crate::models::respond_err(&e))
        }
    }
}
