//! Class storage.

use super::SeaOrmStorage;
use crate::entity::{classes, courses, enrollments, schedules};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::Class,
        requests::{ClassPatch, ClassQueryParams, NewClass},
        responses::ClassListResponse,
    },
    courses::entities::Course,
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = classes::ActiveModel {
            course_id: Set(class.course_id),
            name: Set(class.name),
            start_date: Set(class.start_date),
            end_date: Set(class.end_date),
            max_students: Set(class.max_students),
            current_enrollment: Set(0),
            status: Set(class.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_class())
    }

    pub async fn get_class_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = classes::Entity::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn get_class_with_course_impl(
        &self,
        class_id: i64,
    ) -> Result<Option<(Class, Course)>> {
        let result = classes::Entity::find_by_id(class_id)
            .find_also_related(courses::Entity)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class lookup failed: {e}")))?;

        match result {
            Some((class, Some(course))) => Ok(Some((class.into_class(), course.into_course()))),
            Some((class, None)) => Err(LmsError::integrity(format!(
                "Class {} references missing course {}",
                class.id, class.course_id
            ))),
            None => Ok(None),
        }
    }

    pub async fn list_classes_impl(&self, query: ClassQueryParams) -> Result<ClassListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.per_page.clamp(1, 100) as u64;

        let mut select = classes::Entity::find();

        if let Some(ref course_id) = query.course_id {
            select = select.filter(classes::Column::CourseId.eq(course_id));
        }

        if let Some(ref status) = query.status {
            select = select.filter(classes::Column::Status.eq(status.to_ascii_uppercase()));
        }

        if query.ongoing.unwrap_or(false) {
            let today = crate::utils::datetime::today();
            select = select
                .filter(classes::Column::StartDate.lte(today))
                .filter(classes::Column::EndDate.gte(today));
        }

        if query.available_only.unwrap_or(false) {
            select = select.filter(seats_available());
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(classes::Column::Name.contains(&escaped));
        }

        let descending = matches!(query.sort_dir.as_deref(), Some("desc"));
        select = match (query.sort_by.as_deref(), descending) {
            (Some("name"), false) => select.order_by_asc(classes::Column::Name),
            (Some("name"), true) => select.order_by_desc(classes::Column::Name),
            (Some("start_date"), false) => select.order_by_asc(classes::Column::StartDate),
            (Some("start_date"), true) => select.order_by_desc(classes::Column::StartDate),
            (_, true) => select.order_by_desc(classes::Column::Id),
            (_, false) => select.order_by_asc(classes::Column::Id),
        };

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Class count failed: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("Class page count failed: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class list failed: {e}")))?;

        Ok(ClassListResponse {
            items: rows.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                per_page: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_class_impl(
        &self,
        class_id: i64,
        patch: ClassPatch,
    ) -> Result<Option<Class>> {
        let existing = self.get_class_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = classes::ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(date) = patch.start_date {
            model.start_date = Set(date);
        }
        if let Some(date) = patch.end_date {
            model.end_date = Set(date);
        }
        if let Some(max) = patch.max_students {
            model.max_students = Set(Some(max));
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }

        model.update(&self.db).await?;
        self.get_class_impl(class_id).await
    }

    /// Delete a class unless it still carries enrollments or sessions.
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let enrolled = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment count failed: {e}")))?;
        if enrolled > 0 {
            return Err(LmsError::conflict(format!(
                "Class {class_id} still has {enrolled} enrollment(s)"
            )));
        }

        let sessions = schedules::Entity::find()
            .filter(schedules::Column::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule count failed: {e}")))?;
        if sessions > 0 {
            return Err(LmsError::conflict(format!(
                "Class {class_id} still has {sessions} scheduled session(s)"
            )));
        }

        let result = classes::Entity::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class delete failed: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

// `lt` is called through the trait path; importing `ExprTrait` wholesale
// shadows `Ord::max` used by the pagination clamps above.
fn seats_available() -> Condition {
    Condition::any()
        .add(classes::Column::MaxStudents.is_null())
        .add(sea_orm::ExprTrait::lt(
            Expr::col(classes::Column::CurrentEnrollment),
            Expr::col(classes::Column::MaxStudents),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_filter_compares_enrollment_to_capacity() {
        let rendered = format!("{:?}", seats_available())
            .to_lowercase()
            .replace('_', "");
        assert!(rendered.contains("maxstudents"));
        assert!(rendered.contains("currentenrollment"));
        assert!(rendered.contains("smallerthan"));
    }
}
