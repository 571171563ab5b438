pub mod create;
pub mod delete;
pub mod enroll;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, EnrollRequest, UpdateClassRequest,
};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, data).await
    }

    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        data: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, class_id, data).await
    }

    pub async fn unenroll_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        data: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::unenroll_student(self, request, class_id, data).await
    }
}
