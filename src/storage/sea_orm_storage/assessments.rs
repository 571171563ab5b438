//! Assessment storage: the parts catalog, tests with their question sets,
//! and the append-only attempt log.

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{attempts, choices, items, parts, tests};
use crate::errors::{LmsError, Result};
use crate::models::assessments::{
    entities::{Attempt, Choice, Item, Part, Test, test_group_key},
    requests::{ItemSpec, NewAttempt, NewTest, TestPatch},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    // Parts catalog

    pub async fn list_parts_impl(&self) -> Result<Vec<Part>> {
        let rows = parts::Entity::find()
            .order_by_asc(parts::Column::DisplayOrder)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Part list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_part()).collect())
    }

    pub async fn get_part_impl(&self, part_id: i64) -> Result<Option<Part>> {
        let result = parts::Entity::find_by_id(part_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Part lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_part()))
    }

    /// Populate the catalog once; an already-seeded table is left alone.
    pub async fn seed_parts_impl(&self, entries: &[(&str, i32)]) -> Result<()> {
        let existing = parts::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Part count failed: {e}")))?;
        if existing > 0 {
            return Ok(());
        }

        let models: Vec<parts::ActiveModel> = entries
            .iter()
            .map(|(name, order)| parts::ActiveModel {
                name: Set(name.to_string()),
                display_order: Set(*order),
                ..Default::default()
            })
            .collect();

        parts::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Part seed failed: {e}")))?;

        Ok(())
    }

    // Tests

    pub async fn create_test_with_items_impl(
        &self,
        test: NewTest,
        specs: Vec<ItemSpec>,
    ) -> Result<Test> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = tests::ActiveModel {
            class_id: Set(test.class_id),
            teacher_id: Set(test.teacher_id),
            name: Set(test.name),
            status: Set(test.status.as_str().to_string()),
            available_from: Set(test.available_from),
            due_at: Set(test.due_at),
            max_attempts: Set(test.max_attempts),
            time_limit_minutes: Set(test.time_limit_minutes),
            total_questions: Set(specs.len() as i32),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;

        Self::insert_item_specs(&txn, specs, Some(inserted.id), None, test_group_key(inserted.id))
            .await?;

        txn.commit().await?;
        Ok(inserted.into_test())
    }

    pub async fn update_test_with_items_impl(
        &self,
        test_id: i64,
        patch: TestPatch,
        specs: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Test>> {
        let txn = self.db.begin().await?;

        let existing = tests::Entity::find_by_id(test_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Test lookup failed: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = tests::ActiveModel {
            id: Set(test_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }
        if let Some(from) = patch.available_from {
            model.available_from = Set(Some(from));
        }
        if let Some(due) = patch.due_at {
            model.due_at = Set(Some(due));
        }
        if let Some(max) = patch.max_attempts {
            model.max_attempts = Set(max);
        }
        if let Some(limit) = patch.time_limit_minutes {
            model.time_limit_minutes = Set(Some(limit));
        }

        // Overwrite semantics: a provided item list replaces the whole set
        // and refreshes the cached count.
        if let Some(ref specs) = specs {
            model.total_questions = Set(specs.len() as i32);
        }

        let updated = model.update(&txn).await?;

        if let Some(specs) = specs {
            let old_ids = Self::test_item_ids(&txn, test_id).await?;
            Self::delete_items_with_choices(&txn, &old_ids).await?;
            Self::insert_item_specs(&txn, specs, Some(test_id), None, test_group_key(test_id))
                .await?;
        }

        txn.commit().await?;
        Ok(Some(updated.into_test()))
    }

    /// A test with recorded attempts is history and cannot be deleted.
    pub async fn delete_test_impl(&self, test_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let attempt_count = attempts::Entity::find()
            .filter(attempts::Column::TestId.eq(test_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Attempt count failed: {e}")))?;
        if attempt_count > 0 {
            return Err(LmsError::conflict(format!(
                "Test {test_id} has {attempt_count} recorded attempt(s)"
            )));
        }

        let old_ids = Self::test_item_ids(&txn, test_id).await?;
        Self::delete_items_with_choices(&txn, &old_ids).await?;

        let result = tests::Entity::delete_by_id(test_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Test delete failed: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_test_impl(&self, test_id: i64) -> Result<Option<Test>> {
        let result = tests::Entity::find_by_id(test_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Test lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_test()))
    }

    pub async fn list_tests_by_classes_impl(&self, class_ids: &[i64]) -> Result<Vec<Test>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = tests::Entity::find()
            .filter(tests::Column::ClassId.is_in(class_ids.iter().copied()))
            .order_by_desc(tests::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Test list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_test()).collect())
    }

    pub async fn items_with_choices_for_test_impl(
        &self,
        test_id: i64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        let item_rows = items::Entity::find()
            .filter(
                sea_orm::Condition::any()
                    .add(items::Column::TestId.eq(test_id))
                    .add(items::Column::ItemGroupKey.eq(test_group_key(test_id))),
            )
            .order_by_asc(items::Column::OrderInPart)
            .order_by_asc(items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item list failed: {e}")))?;

        self.attach_choices(item_rows).await
    }

    pub async fn count_items_for_test_impl(&self, test_id: i64) -> Result<i64> {
        let count = items::Entity::find()
            .filter(
                sea_orm::Condition::any()
                    .add(items::Column::TestId.eq(test_id))
                    .add(items::Column::ItemGroupKey.eq(test_group_key(test_id))),
            )
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item count failed: {e}")))?;

        Ok(count as i64)
    }

    // Attempts

    pub async fn insert_attempt_impl(&self, attempt: NewAttempt) -> Result<Attempt> {
        let model = attempts::ActiveModel {
            test_id: Set(attempt.test_id),
            student_id: Set(attempt.student_id),
            class_id: Set(attempt.class_id),
            started_at: Set(attempt.started_at.map(|t| t.timestamp())),
            submitted_at: Set(attempt.submitted_at.map(|t| t.timestamp())),
            raw_score: Set(attempt.raw_score),
            status: Set(attempt.status),
            responses_json: Set(attempt.responses_json),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_attempt())
    }

    pub async fn count_attempts_impl(&self, test_id: i64, student_id: &str) -> Result<i64> {
        let count = attempts::Entity::find()
            .filter(attempts::Column::TestId.eq(test_id))
            .filter(attempts::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Attempt count failed: {e}")))?;

        Ok(count as i64)
    }

    /// Newest submission first; rows without a submission time sink to the
    /// end.
    pub async fn list_attempts_for_test_impl(&self, test_id: i64) -> Result<Vec<Attempt>> {
        let rows = attempts::Entity::find()
            .filter(attempts::Column::TestId.eq(test_id))
            .order_by_with_nulls(
                attempts::Column::SubmittedAt,
                sea_orm::Order::Desc,
                sea_orm::sea_query::NullOrdering::Last,
            )
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Attempt list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_attempt()).collect())
    }

    // Shared item helpers

    /// Insert a validated question set with its choices, linked to a test or
    /// a lesson via both the foreign key and the legacy group key.
    pub(super) async fn insert_item_specs<C: ConnectionTrait>(
        conn: &C,
        specs: Vec<ItemSpec>,
        test_id: Option<i64>,
        lesson_id: Option<i64>,
        group_key: String,
    ) -> Result<()> {
        for spec in specs {
            let item_model = items::ActiveModel {
                part_id: Set(spec.part_id),
                test_id: Set(test_id),
                lesson_id: Set(lesson_id),
                item_group_key: Set(Some(group_key.clone())),
                question_text: Set(spec.question_text),
                stimulus_text: Set(spec.stimulus_text),
                image_path: Set(spec.image_path),
                audio_path: Set(spec.audio_path),
                order_in_part: Set(spec.order_in_part),
                ..Default::default()
            };

            let inserted = item_model.insert(conn).await?;

            let choice_models: Vec<choices::ActiveModel> = spec
                .choices
                .into_iter()
                .map(|c| choices::ActiveModel {
                    item_id: Set(inserted.id),
                    label: Set(c.label),
                    content: Set(c.content),
                    is_correct: Set(c.is_correct),
                    ..Default::default()
                })
                .collect();

            choices::Entity::insert_many(choice_models)
                .exec(conn)
                .await
                .map_err(|e| LmsError::database_operation(format!("Choice insert failed: {e}")))?;
        }

        Ok(())
    }

    pub(super) async fn delete_items_with_choices<C: ConnectionTrait>(
        conn: &C,
        item_ids: &[i64],
    ) -> Result<()> {
        if item_ids.is_empty() {
            return Ok(());
        }

        choices::Entity::delete_many()
            .filter(choices::Column::ItemId.is_in(item_ids.iter().copied()))
            .exec(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Choice delete failed: {e}")))?;

        items::Entity::delete_many()
            .filter(items::Column::Id.is_in(item_ids.iter().copied()))
            .exec(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item delete failed: {e}")))?;

        Ok(())
    }

    /// Attach choices to already-ordered item rows, preserving item order.
    pub(super) async fn attach_choices(
        &self,
        item_rows: Vec<items::Model>,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        if item_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = item_rows.iter().map(|m| m.id).collect();
        let choice_rows = choices::Entity::find()
            .filter(choices::Column::ItemId.is_in(ids))
            .order_by_asc(choices::Column::Label)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Choice list failed: {e}")))?;

        let mut by_item: HashMap<i64, Vec<Choice>> = HashMap::new();
        for row in choice_rows {
            by_item.entry(row.item_id).or_default().push(row.into_choice());
        }
        for list in by_item.values_mut() {
            sort_choices_by_label(list);
        }

        Ok(item_rows
            .into_iter()
            .map(|m| {
                let choices = by_item.remove(&m.id).unwrap_or_default();
                (m.into_item(), choices)
            })
            .collect())
    }

    async fn test_item_ids<C: ConnectionTrait>(conn: &C, test_id: i64) -> Result<Vec<i64>> {
        items::Entity::find()
            .select_only()
            .column(items::Column::Id)
            .filter(
                sea_orm::Condition::any()
                    .add(items::Column::TestId.eq(test_id))
                    .add(items::Column::ItemGroupKey.eq(test_group_key(test_id))),
            )
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Item id query failed: {e}")))
    }
}

// Choices always surface in label order (A, B, C, ...), whatever order they
// were inserted or re-inserted in.
fn sort_choices_by_label(choices: &mut [Choice]) {
    choices.sort_by(|a, b| a.label.cmp(&b.label));
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn choice(id: i64, label: &str) -> Choice {
        Choice {
            id,
            item_id: 1,
            label: label.to_string(),
            content: format!("choice {label}"),
            is_correct: false,
        }
    }

    #[test]
    fn test_choices_surface_in_label_order() {
        let mut choices = vec![choice(11, "C"), choice(9, "A"), choice(10, "B")];
        sort_choices_by_label(&mut choices);
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        // Insertion ids no longer dictate the order.
        assert_eq!(choices[0].id, 9);
    }
}
