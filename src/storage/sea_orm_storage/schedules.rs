//! Schedule storage. Conflict checks and writes share one transaction; the
//! unique indexes on (date, room, start) and (date, teacher, start) back the
//! check against racing writers.

use super::SeaOrmStorage;
use crate::entity::{classes, schedules};
use crate::errors::{LmsError, Result};
use crate::models::{
    classes::entities::Class,
    schedules::{entities::Schedule, requests::NewSchedule},
};
use crate::storage::ScheduleCheckOutcome;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// Sessions on the same date sharing the room or the teacher whose
    /// half-open interval overlaps the candidate. Touching boundaries do not
    /// overlap.
    async fn find_conflicts<C: ConnectionTrait>(
        conn: &C,
        candidate: &NewSchedule,
        exclude_id: Option<i64>,
    ) -> Result<Vec<schedules::Model>> {
        let mut select = schedules::Entity::find()
            .filter(schedules::Column::ScheduleDate.eq(candidate.schedule_date))
            .filter(
                Condition::any()
                    .add(schedules::Column::RoomId.eq(candidate.room_id))
                    .add(schedules::Column::TeacherId.eq(candidate.teacher_id.clone())),
            )
            .filter(schedules::Column::StartTime.lt(candidate.end_time))
            .filter(schedules::Column::EndTime.gt(candidate.start_time));

        if let Some(id) = exclude_id {
            select = select.filter(schedules::Column::Id.ne(id));
        }

        select
            .order_by_asc(schedules::Column::StartTime)
            .all(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Conflict query failed: {e}")))
    }

    pub async fn create_schedule_checked_impl(
        &self,
        schedule: NewSchedule,
    ) -> Result<ScheduleCheckOutcome> {
        let txn = self.db.begin().await?;

        let conflicts = Self::find_conflicts(&txn, &schedule, None).await?;
        if !conflicts.is_empty() {
            return Ok(ScheduleCheckOutcome::Conflicts(
                conflicts.into_iter().map(|m| m.into_schedule()).collect(),
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let model = schedules::ActiveModel {
            room_id: Set(schedule.room_id),
            class_id: Set(schedule.class_id),
            teacher_id: Set(schedule.teacher_id),
            schedule_date: Set(schedule.schedule_date),
            start_time: Set(schedule.start_time),
            end_time: Set(schedule.end_time),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(ScheduleCheckOutcome::Created(inserted.into_schedule()))
    }

    pub async fn update_schedule_checked_impl(
        &self,
        schedule_id: i64,
        schedule: NewSchedule,
    ) -> Result<Option<ScheduleCheckOutcome>> {
        let txn = self.db.begin().await?;

        let existing = schedules::Entity::find_by_id(schedule_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule lookup failed: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let conflicts = Self::find_conflicts(&txn, &schedule, Some(schedule_id)).await?;
        if !conflicts.is_empty() {
            return Ok(Some(ScheduleCheckOutcome::Conflicts(
                conflicts.into_iter().map(|m| m.into_schedule()).collect(),
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let model = schedules::ActiveModel {
            id: Set(schedule_id),
            room_id: Set(schedule.room_id),
            class_id: Set(schedule.class_id),
            teacher_id: Set(schedule.teacher_id),
            schedule_date: Set(schedule.schedule_date),
            start_time: Set(schedule.start_time),
            end_time: Set(schedule.end_time),
            updated_at: Set(now),
            ..Default::default()
        };

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(ScheduleCheckOutcome::Created(updated.into_schedule())))
    }

    pub async fn get_schedule_impl(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        let result = schedules::Entity::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = schedules::Entity::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule delete failed: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_schedules_by_class_impl(&self, class_id: i64) -> Result<Vec<Schedule>> {
        let rows = schedules::Entity::find()
            .filter(schedules::Column::ClassId.eq(class_id))
            .order_by_asc(schedules::Column::ScheduleDate)
            .order_by_asc(schedules::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_schedule()).collect())
    }

    pub async fn list_schedules_for_teacher_impl(
        &self,
        teacher_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Schedule>> {
        let rows = schedules::Entity::find()
            .filter(schedules::Column::TeacherId.eq(teacher_id))
            .filter(schedules::Column::ScheduleDate.gte(from))
            .filter(schedules::Column::ScheduleDate.lte(to))
            .order_by_asc(schedules::Column::ScheduleDate)
            .order_by_asc(schedules::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_schedule()).collect())
    }

    /// Ownership in the scheduling sense: at least one session of the class
    /// is assigned to this teacher.
    pub async fn teacher_owns_class_impl(&self, teacher_id: &str, class_id: i64) -> Result<bool> {
        let count = schedules::Entity::find()
            .filter(schedules::Column::TeacherId.eq(teacher_id))
            .filter(schedules::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Ownership query failed: {e}")))?;

        Ok(count > 0)
    }

    pub async fn list_classes_taught_by_impl(&self, teacher_id: &str) -> Result<Vec<Class>> {
        let class_ids: Vec<i64> = schedules::Entity::find()
            .select_only()
            .column(schedules::Column::ClassId)
            .distinct()
            .filter(schedules::Column::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class id query failed: {e}")))?;

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = classes::Entity::find()
            .filter(classes::Column::Id.is_in(class_ids))
            .order_by_asc(classes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_class()).collect())
    }
}
