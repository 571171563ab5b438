use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::Role;
use crate::models::users::requests::{CreateStudentRequest, CreateTeacherRequest, UserQueryParams};
use crate::services::UserService;

static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn create_teacher(
    req: HttpRequest,
    data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_teacher(&req, data.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_student(&req, data.into_inner()).await
}

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<UserQueryParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_teachers(&req, query.into_inner()).await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<UserQueryParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_students(&req, query.into_inner()).await
}

// Account management is an admin concern.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(Role::admin_roles()))
                    .route("/teachers", web::post().to(create_teacher))
                    .route("/teachers", web::get().to(list_teachers))
                    .route("/students", web::post().to(create_student))
                    .route("/students", web::get().to(list_students)),
            ),
    );
}
