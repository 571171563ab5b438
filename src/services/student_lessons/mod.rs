pub mod detail;
pub mod grading;
pub mod list;
pub mod quiz;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::SubmissionRequest;
use crate::storage::Storage;

pub struct StudentLessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentLessonService {
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

    pub async fn list_lessons(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request).await
    }

    pub async fn lesson_detail(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::lesson_detail(self, request, lesson_id).await
    }

    pub async fn submit_quiz(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        data: SubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        quiz::submit_quiz(self, request, lesson_id, data).await
    }
}
