//! Lesson storage. Item rewrites are transactional: the old question set is
//! only gone once the replacement is fully written.

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{items, lessons};
use crate::errors::{LmsError, Result};
use crate::models::{
    assessments::{
        entities::{Choice, Item, lesson_group_key},
        requests::{ItemSpec, LessonPatch, NewLesson},
    },
    lessons::entities::Lesson,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_lesson_with_items_impl(
        &self,
        lesson: NewLesson,
        specs: Vec<ItemSpec>,
    ) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = lessons::ActiveModel {
            lp_id: Set(lesson.lp_id),
            part_id: Set(lesson.part_id),
            name: Set(lesson.name),
            video_url: Set(lesson.video_url),
            available_from: Set(lesson.available_from),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;

        Self::insert_item_specs(
            &txn,
            specs,
            None,
            Some(inserted.id),
            lesson_group_key(inserted.id),
        )
        .await?;

        txn.commit().await?;
        Ok(inserted.into_lesson())
    }

    pub async fn update_lesson_with_items_impl(
        &self,
        lesson_id: i64,
        patch: LessonPatch,
        specs: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Lesson>> {
        let txn = self.db.begin().await?;

        let existing = lessons::Entity::find_by_id(lesson_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Lesson lookup failed: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = lessons::ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(part_id) = patch.part_id {
            model.part_id = Set(part_id);
        }
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(video_url) = patch.video_url {
            model.video_url = Set(Some(video_url));
        }
        if let Some(date) = patch.available_from {
            model.available_from = Set(Some(date));
        }

        let updated = model.update(&txn).await?;

        // Overwrite semantics: a provided item list replaces the whole set.
        if let Some(specs) = specs {
            let old_ids = Self::lesson_item_ids(&txn, lesson_id).await?;
            Self::delete_items_with_choices(&txn, &old_ids).await?;
            Self::insert_item_specs(
                &txn,
                specs,
                None,
                Some(lesson_id),
                lesson_group_key(lesson_id),
            )
            .await?;
        }

        txn.commit().await?;
        Ok(Some(updated.into_lesson()))
    }

    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let old_ids = Self::lesson_item_ids(&txn, lesson_id).await?;
        Self::delete_items_with_choices(&txn, &old_ids).await?;

        let result = lessons::Entity::delete_by_id(lesson_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Lesson delete failed: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_lesson_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = lessons::Entity::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Lesson lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// Lessons of the given learning paths in week order: dated lessons
    /// first by availability date, undated ones last. Sorted here rather
    /// than in SQL so NULL ordering does not vary by backend.
    pub async fn list_lessons_for_paths_impl(&self, lp_ids: &[String]) -> Result<Vec<Lesson>> {
        if lp_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = lessons::Entity::find()
            .filter(lessons::Column::LpId.is_in(lp_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Lesson list failed: {e}")))?;

        let mut result: Vec<Lesson> = rows.into_iter().map(|m| m.into_lesson()).collect();
        result.sort_by(|a, b| {
            a.lp_id
                .cmp(&b.lp_id)
                .then_with(|| a.delivery_order().cmp(&b.delivery_order()))
        });
        Ok(result)
    }

    pub async fn lesson_question_counts_impl(
        &self,
        lesson_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        if lesson_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let keys: Vec<String> = lesson_ids.iter().map(|id| lesson_group_key(*id)).collect();
        let rows = items::Entity::find()
            .select_only()
            .column(items::Column::LessonId)
            .column(items::Column::ItemGroupKey)
            .filter(
                Condition::any()
                    .add(items::Column::LessonId.is_in(lesson_ids.iter().copied()))
                    .add(items::Column::ItemGroupKey.is_in(keys)),
            )
            .into_tuple::<(Option<i64>, Option<String>)>()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item count failed: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for (lesson_id, group_key) in rows {
            // Prefer the explicit link; fall back to parsing the legacy key.
            let id = lesson_id.or_else(|| {
                group_key
                    .as_deref()
                    .and_then(|k| k.strip_prefix("lesson-"))
                    .and_then(|n| n.parse().ok())
            });
            if let Some(id) = id {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        Ok(counts)
    }

    /// Items of a lesson, linked either by the explicit foreign key or the
    /// legacy group key, with their choices.
    pub async fn items_with_choices_for_lesson_impl(
        &self,
        lesson_id: i64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        let item_rows = items::Entity::find()
            .filter(
                Condition::any()
                    .add(items::Column::LessonId.eq(lesson_id))
                    .add(items::Column::ItemGroupKey.eq(lesson_group_key(lesson_id))),
            )
            .order_by_asc(items::Column::OrderInPart)
            .order_by_asc(items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item list failed: {e}")))?;

        self.attach_choices(item_rows).await
    }

    /// Part-wide fallback pool for lessons without their own question set.
    pub async fn items_with_choices_for_part_impl(
        &self,
        part_id: i64,
        limit: u64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        let item_rows = items::Entity::find()
            .filter(items::Column::PartId.eq(part_id))
            .order_by_asc(items::Column::OrderInPart)
            .order_by_asc(items::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item list failed: {e}")))?;

        self.attach_choices(item_rows).await
    }

    async fn lesson_item_ids<C: sea_orm::ConnectionTrait>(
        conn: &C,
        lesson_id: i64,
    ) -> Result<Vec<i64>> {
        items::Entity::find()
            .select_only()
            .column(items::Column::Id)
            .filter(
                Condition::any()
                    .add(items::Column::LessonId.eq(lesson_id))
                    .add(items::Column::ItemGroupKey.eq(lesson_group_key(lesson_id))),
            )
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item id query failed: {e}")))
    }
}
