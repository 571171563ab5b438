use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;
use ts_rs::TS;

use crate::middlewares;
use crate::models::assessments::requests::{
    CreateLessonRequest, CreateTestRequest, UpdateLessonRequest, UpdateTestRequest,
};
use crate::models::users::entities::Role;
use crate::services::{TeacherLessonService, TeacherTestService};
use crate::utils::{SafeLessonIdI64, SafeTestIdI64};

static LESSON_SERVICE: Lazy<TeacherLessonService> = Lazy::new(TeacherLessonService::new_lazy);
static TEST_SERVICE: Lazy<TeacherTestService> = Lazy::new(TeacherTestService::new_lazy);

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct TeacherTestQuery {
    pub class_id: Option<i64>,
}

pub async fn create_lesson(
    req: HttpRequest,
    data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, data.into_inner()).await
}

pub async fn lesson_detail(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.lesson_detail(&req, lesson_id.0).await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, lesson_id.0, data.into_inner())
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, lesson_id.0).await
}

pub async fn test_setup(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEST_SERVICE.test_setup(&req).await
}

pub async fn list_tests(
    req: HttpRequest,
    query: web::Query<TeacherTestQuery>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE.list_tests(&req, query.into_inner().class_id).await
}

pub async fn create_test(
    req: HttpRequest,
    data: web::Json<CreateTestRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE.create_test(&req, data.into_inner()).await
}

pub async fn test_detail(req: HttpRequest, test_id: SafeTestIdI64) -> ActixResult<HttpResponse> {
    TEST_SERVICE.test_detail(&req, test_id.0).await
}

pub async fn update_test(
    req: HttpRequest,
    test_id: SafeTestIdI64,
    data: web::Json<UpdateTestRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE
        .update_test(&req, test_id.0, data.into_inner())
        .await
}

pub async fn delete_test(req: HttpRequest, test_id: SafeTestIdI64) -> ActixResult<HttpResponse> {
    TEST_SERVICE.delete_test(&req, test_id.0).await
}

pub async fn scoreboard(req: HttpRequest, test_id: SafeTestIdI64) -> ActixResult<HttpResponse> {
    TEST_SERVICE.scoreboard(&req, test_id.0).await
}

pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teacher")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(Role::teacher_roles()))
                    .route("/lessons", web::post().to(create_lesson))
                    .route("/lessons/{lesson_id}", web::get().to(lesson_detail))
                    .route("/lessons/{lesson_id}", web::put().to(update_lesson))
                    .route("/lessons/{lesson_id}", web::delete().to(delete_lesson))
                    .route("/tests/setup", web::get().to(test_setup))
                    .route("/tests", web::get().to(list_tests))
                    .route("/tests", web::post().to(create_test))
                    .route("/tests/{test_id}", web::get().to(test_detail))
                    .route("/tests/{test_id}", web::put().to(update_test))
                    .route("/tests/{test_id}", web::delete().to(delete_test))
                    .route("/tests/{test_id}/scoreboard", web::get().to(scoreboard)),
            ),
    );
}
