pub mod availability;
pub mod conflict;
pub mod create;
pub mod delete;
pub mod list;
pub mod recurrence;
pub mod recurring;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::requests::{
    RecurringScheduleRequest, SchedulePayload, TeacherAvailabilityQuery, UpdateScheduleRequest,
};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
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

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        data: SchedulePayload,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, data).await
    }

    pub async fn create_recurring(
        &self,
        request: &HttpRequest,
        data: RecurringScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        recurring::create_recurring(self, request, data).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        data: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, request, schedule_id, data).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, schedule_id).await
    }

    pub async fn list_class_schedules(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_class_schedules(self, request, class_id).await
    }

    pub async fn teacher_availability(
        &self,
        request: &HttpRequest,
        query: TeacherAvailabilityQuery,
    ) -> ActixResult<HttpResponse> {
        availability::teacher_availability(self, request, query).await
    }
}
