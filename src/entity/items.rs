//! Item entity: a single question.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub part_id: i64,
    pub test_id: Option<i64>,
    // Explicit parent link; item_group_key is the derived legacy form.
    pub lesson_id: Option<i64>,
    pub item_group_key: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub stimulus_text: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub order_in_part: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parts::Entity",
        from = "Column::PartId",
        to = "super::parts::Column::Id"
    )]
    Part,
    #[sea_orm(
        belongs_to = "super::tests::Entity",
        from = "Column::TestId",
        to = "super::tests::Column::Id"
    )]
    Test,
    #[sea_orm(
        belongs_to = "super::lessons::Entity",
        from = "Column::LessonId",
        to = "super::lessons::Column::Id"
    )]
    Lesson,
    #[sea_orm(has_many = "super::choices::Entity")]
    Choices,
}

impl Related<super::parts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl Related<super::tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::choices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_item(self) -> crate::models::assessments::entities::Item {
        crate::models::assessments::entities::Item {
            id: self.id,
            part_id: self.part_id,
            test_id: self.test_id,
            lesson_id: self.lesson_id,
            item_group_key: self.item_group_key,
            question_text: self.question_text,
            stimulus_text: self.stimulus_text,
            image_path: self.image_path,
            audio_path: self.audio_path,
            order_in_part: self.order_in_part,
        }
    }
}
