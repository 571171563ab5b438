pub mod aggregate;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod scoreboard;
pub mod setup;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assessments::requests::{CreateTestRequest, UpdateTestRequest};
use crate::models::users::entities::Principal;
use crate::storage::Storage;

pub struct TeacherTestService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherTestService {
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

    pub async fn test_setup(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        setup::test_setup(self, request).await
    }

    pub async fn list_tests(
        &self,
        request: &HttpRequest,
        class_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        list::list_tests(self, request, class_id).await
    }

    pub async fn create_test(
        &self,
        request: &HttpRequest,
        data: CreateTestRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_test(self, request, data).await
    }

    pub async fn update_test(
        &self,
        request: &HttpRequest,
        test_id: i64,
        data: UpdateTestRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_test(self, request, test_id, data).await
    }

    pub async fn delete_test(
        &self,
        request: &HttpRequest,
        test_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_test(self, request, test_id).await
    }

    pub async fn test_detail(
        &self,
        request: &HttpRequest,
        test_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::test_detail(self, request, test_id).await
    }

    pub async fn scoreboard(
        &self,
        request: &HttpRequest,
        test_id: i64,
    ) -> ActixResult<HttpResponse> {
        scoreboard::scoreboard(self, request, test_id).await
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
