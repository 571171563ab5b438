pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::SubmissionRequest;
use crate::storage::Storage;

pub struct StudentTestService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentTestService {
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

    pub async fn list_tests(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_tests(self, request).await
    }

    pub async fn submit_test(
        &self,
        request: &HttpRequest,
        test_id: i64,
        data: SubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_test(self, request, test_id, data).await
    }
}
