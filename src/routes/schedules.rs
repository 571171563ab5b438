use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::requests::{
    RecurringScheduleRequest, SchedulePayload, TeacherAvailabilityQuery, UpdateScheduleRequest,
};
use crate::models::users::entities::Role;
use crate::services::ScheduleService;
use crate::utils::SafeScheduleIdI64;

static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn create_schedule(
    req: HttpRequest,
    data: web::Json<SchedulePayload>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.create_schedule(&req, data.into_inner()).await
}

pub async fn create_recurring(
    req: HttpRequest,
    data: web::Json<RecurringScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.create_recurring(&req, data.into_inner()).await
}

pub async fn teacher_availability(
    req: HttpRequest,
    query: web::Query<TeacherAvailabilityQuery>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .teacher_availability(&req, query.into_inner())
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleIdI64,
    data: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, schedule_id.0, data.into_inner())
        .await
}

pub async fn delete_schedule(
    req: HttpRequest,
    schedule_id: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, schedule_id.0).await
}

pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_schedule)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("/recurring").route(
                    web::post()
                        .to(create_recurring)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("/teacher-availability").route(
                    web::get()
                        .to(teacher_availability)
                        .wrap(middlewares::RequireRole::new_any(Role::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{schedule_id}")
                    .route(
                        web::put()
                            .to(update_schedule)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_schedule)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            ),
    );
}
