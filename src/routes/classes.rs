use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, EnrollRequest, UpdateClassRequest,
};
use crate::models::users::entities::Role;
use crate::services::{ClassService, ScheduleService};
use crate::utils::SafeClassIdI64;

static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, data.into_inner()).await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn enroll_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .enroll_student(&req, class_id.0, data.into_inner())
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .unenroll_student(&req, class_id.0, data.into_inner())
        .await
}

pub async fn list_class_schedules(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_class_schedules(&req, class_id.0).await
}

pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{class_id}/enroll").route(
                    web::post()
                        .to(enroll_student)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}/unenroll").route(
                    web::post()
                        .to(unenroll_student)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}/schedules").route(web::get().to(list_class_schedules)),
            ),
    );
}
