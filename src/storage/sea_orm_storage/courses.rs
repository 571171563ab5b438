//! Course storage, including the 1:1 learning path.

use super::SeaOrmStorage;
use crate::entity::{classes, courses, learning_paths};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, LearningPath},
        requests::{CoursePatch, CourseQueryParams, NewCourse},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// Insert a course and its optional learning path in one transaction.
    pub async fn create_course_impl(&self, course: NewCourse) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = courses::ActiveModel {
            course_id: Set(course.course_id.clone()),
            name: Set(course.name),
            status: Set(course.status.as_str().to_string()),
            prerequisite_id: Set(course.prerequisite_id),
            target_score: Set(course.target_score),
            level: Set(course.level),
            start_date: Set(course.start_date),
            end_date: Set(course.end_date),
            tuition: Set(course.tuition),
            capacity: Set(course.capacity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&txn).await?;

        if let Some(lp) = course.learning_path {
            let lp_model = learning_paths::ActiveModel {
                course_id: Set(course.course_id.clone()),
                title: Set(lp.title),
                objective: Set(lp.objective),
                description: Set(lp.description),
            };
            lp_model.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(inserted.into_course())
    }

    pub async fn get_course_impl(&self, course_id: &str) -> Result<Option<Course>> {
        let result = courses::Entity::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_detail_impl(
        &self,
        course_id: &str,
    ) -> Result<Option<(Course, Option<LearningPath>)>> {
        let Some(course) = courses::Entity::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course lookup failed: {e}")))?
        else {
            return Ok(None);
        };

        let lp = learning_paths::Entity::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Learning path lookup failed: {e}"))
            })?;

        Ok(Some((
            course.into_course(),
            lp.map(|m| m.into_learning_path()),
        )))
    }

    pub async fn list_courses_impl(&self, query: CourseQueryParams) -> Result<CourseListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.per_page.clamp(1, 100) as u64;

        let mut select = courses::Entity::find();

        if let Some(ref status) = query.status {
            select = select.filter(courses::Column::Status.eq(status.to_ascii_uppercase()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(courses::Column::CourseId.contains(&escaped))
                    .add(courses::Column::Name.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(courses::Column::CourseId)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Course count failed: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("Course page count failed: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course list failed: {e}")))?;

        Ok(CourseListResponse {
            items: rows.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                per_page: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_course_impl(
        &self,
        course_id: &str,
        patch: CoursePatch,
    ) -> Result<Option<Course>> {
        let txn = self.db.begin().await?;

        let existing = courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course lookup failed: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = courses::ActiveModel {
            course_id: Set(course_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }
        if let Some(prereq) = patch.prerequisite_id {
            model.prerequisite_id = Set(Some(prereq));
        }
        if let Some(score) = patch.target_score {
            model.target_score = Set(Some(score));
        }
        if let Some(level) = patch.level {
            model.level = Set(Some(level));
        }
        if let Some(date) = patch.start_date {
            model.start_date = Set(Some(date));
        }
        if let Some(date) = patch.end_date {
            model.end_date = Set(Some(date));
        }
        if let Some(tuition) = patch.tuition {
            model.tuition = Set(Some(tuition));
        }
        if let Some(capacity) = patch.capacity {
            model.capacity = Set(Some(capacity));
        }

        model.update(&txn).await?;

        // Upsert the learning path when the patch carries one.
        if let Some(lp) = patch.learning_path {
            let existing_lp = learning_paths::Entity::find_by_id(course_id)
                .one(&txn)
                .await
                .map_err(|e| {
                    LmsError::database_operation(format!("Learning path lookup failed: {e}"))
                })?;

            let lp_model = learning_paths::ActiveModel {
                course_id: Set(course_id.to_string()),
                title: Set(lp.title),
                objective: Set(lp.objective),
                description: Set(lp.description),
            };
            if existing_lp.is_some() {
                lp_model.update(&txn).await?;
            } else {
                lp_model.insert(&txn).await?;
            }
        }

        txn.commit().await?;
        self.get_course_impl(course_id).await
    }

    /// Delete a course unless classes or dependent courses still point at it.
    pub async fn delete_course_impl(&self, course_id: &str) -> Result<bool> {
        let txn = self.db.begin().await?;

        let class_count = classes::Entity::find()
            .filter(classes::Column::CourseId.eq(course_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class count failed: {e}")))?;
        if class_count > 0 {
            return Err(LmsError::conflict(format!(
                "Course {course_id} still has {class_count} class(es)"
            )));
        }

        let dependents = courses::Entity::find()
            .filter(courses::Column::PrerequisiteId.eq(course_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course count failed: {e}")))?;
        if dependents > 0 {
            return Err(LmsError::conflict(format!(
                "Course {course_id} is a prerequisite of {dependents} course(s)"
            )));
        }

        learning_paths::Entity::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Learning path delete failed: {e}"))
            })?;

        let result = courses::Entity::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Course delete failed: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
