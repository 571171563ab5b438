use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::SubmissionRequest;
use crate::models::users::entities::Role;
use crate::services::{StudentLessonService, StudentTestService};
use crate::utils::{SafeLessonIdI64, SafeTestIdI64};

static LESSON_SERVICE: Lazy<StudentLessonService> = Lazy::new(StudentLessonService::new_lazy);
static TEST_SERVICE: Lazy<StudentTestService> = Lazy::new(StudentTestService::new_lazy);

pub async fn list_lessons(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req).await
}

pub async fn lesson_detail(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.lesson_detail(&req, lesson_id.0).await
}

pub async fn submit_quiz(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    data: web::Json<SubmissionRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .submit_quiz(&req, lesson_id.0, data.into_inner())
        .await
}

pub async fn list_tests(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEST_SERVICE.list_tests(&req).await
}

pub async fn submit_test(
    req: HttpRequest,
    test_id: SafeTestIdI64,
    data: web::Json<SubmissionRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE
        .submit_test(&req, test_id.0, data.into_inner())
        .await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/student")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(Role::Student))
                    .route("/lessons", web::get().to(list_lessons))
                    .route("/lessons/{lesson_id}", web::get().to(lesson_detail))
                    .route("/lessons/{lesson_id}/quiz", web::post().to(submit_quiz))
                    .route("/tests", web::get().to(list_tests))
                    .route("/tests/{test_id}/submit", web::post().to(submit_test)),
            ),
    );
}
