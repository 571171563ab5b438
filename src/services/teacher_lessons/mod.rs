pub mod create;
pub mod delete;
pub mod detail;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::models::users::entities::{Principal, Role};
use crate::storage::Storage;

pub struct TeacherLessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherLessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, data).await
    }

    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, lesson_id, data).await
    }

    pub async fn delete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, lesson_id).await
    }

    pub async fn lesson_detail(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::lesson_detail(self, request, lesson_id).await
    }
}

pub(super) fn require_principal(request: &HttpRequest) -> Result<Principal, HttpResponse> {
    RequireJWT::extract_principal(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            "AUTHENTICATION",
            "Authentication required",
        ))
    })
}

/// Course-level ownership for operations addressed by lesson id alone: the
/// teacher must run at least one class of the lesson's course.
pub(super) async fn ensure_owns_course(
    storage: &Arc<dyn Storage>,
    principal: &Principal,
    course_id: &str,
) -> Result<(), HttpResponse> {
    if principal.role == Role::Admin {
        return Ok(());
    }
    match storage.list_classes_taught_by(&principal.id).await {
        Ok(classes) => {
            if teaches_course(&classes, course_id) {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                    "AUTHORIZATION",
                    "You are not assigned to a class of this course",
                )))
            }
        }
        Err(e) => Err(crate::models::respond_err(&e)),
    }
}

fn teaches_course(classes: &[crate::models::classes::entities::Class], course_id: &str) -> bool {
    classes.iter().any(|class| class.course_id == course_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::entities::{Class, ClassStatus};
    use chrono::NaiveDate;

    fn class(id: i64, course_id: &str) -> Class {
        Class {
            id,
            course_id: course_id.to_string(),
            name: format!("Class {id}"),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 27).unwrap(),
            max_students: Some(20),
            current_enrollment: 0,
            status: ClassStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_teaching_one_course_grants_nothing_elsewhere() {
        // Running a class of TOEIC500 must not open lessons of TOEIC700,
        // whatever class id a request names.
        let taught = vec![class(1, "TOEIC500")];
        assert!(teaches_course(&taught, "TOEIC500"));
        assert!(!teaches_course(&taught, "TOEIC700"));
    }

    #[test]
    fn test_any_taught_class_of_the_course_suffices() {
        let taught = vec![class(1, "TOEIC500"), class(2, "TOEIC700")];
        assert!(teaches_course(&taught, "TOEIC700"));
        assert!(!teaches_course(&[], "TOEIC500"));
    }
}
