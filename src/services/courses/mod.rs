pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CourseQueryParams, CreateCourseRequest, UpdateCourseRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, data).await
    }

    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: String,
        data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, data).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }
}

pub(super) fn validate_pricing(
    tuition: Option<f64>,
    capacity: Option<i32>,
) -> Result<(), String> {
    if tuition.is_some_and(|t| t < 0.0) {
        return Err("Tuition must not be negative".to_string());
    }
    if capacity.is_some_and(|c| c < 0) {
        return Err("Capacity must not be negative".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_rejects_negative_values() {
        assert!(validate_pricing(Some(-0.01), None).is_err());
        assert!(validate_pricing(None, Some(-1)).is_err());
    }

    #[test]
    fn test_pricing_accepts_zero_and_absent_values() {
        assert!(validate_pricing(Some(0.0), Some(0)).is_ok());
        assert!(validate_pricing(None, None).is_ok());
        assert!(validate_pricing(Some(4_500_000.0), Some(30)).is_ok());
    }
}
