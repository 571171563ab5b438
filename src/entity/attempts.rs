//! Attempt entity: append-only submission log.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub att_id: i64,
    pub test_id: i64,
    pub student_id: String,
    pub class_id: i64,
    pub started_at: Option<i64>,
    pub submitted_at: Option<i64>,
    pub raw_score: Option<i32>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub responses_json: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tests::Entity",
        from = "Column::TestId",
        to = "super::tests::Column::Id"
    )]
    Test,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::assessments::entities::Attempt {
        use chrono::{DateTime, Utc};

        crate::models::assessments::entities::Attempt {
            att_id: self.att_id,
            test_id: self.test_id,
            student_id: self.student_id,
            class_id: self.class_id,
            started_at: self
                .started_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            submitted_at: self
                .submitted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            raw_score: self.raw_score,
            status: self.status,
            responses_json: self.responses_json,
        }
    }
}
