//! Test entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: String,
    pub name: String,
    pub status: String,
    pub available_from: Option<DateTime>,
    pub due_at: Option<DateTime>,
    pub max_attempts: i32,
    pub time_limit_minutes: Option<i32>,
    pub total_questions: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::items::Entity")]
    Items,
    #[sea_orm(has_many = "super::attempts::Entity")]
    Attempts,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_test(self) -> crate::models::assessments::entities::Test {
        use crate::models::assessments::entities::{Test, TestStatus};
        use chrono::{DateTime, Utc};

        Test {
            status: TestStatus::parse(&self.status).unwrap_or(TestStatus::Inactive),
            id: self.id,
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            name: self.name,
            available_from: self.available_from,
            due_at: self.due_at,
            max_attempts: self.max_attempts,
            time_limit_minutes: self.time_limit_minutes,
            total_questions: self.total_questions,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
