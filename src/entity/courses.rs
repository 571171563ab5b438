//! Course entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: String,
    pub name: String,
    pub status: String,
    pub prerequisite_id: Option<String>,
    pub target_score: Option<i32>,
    pub level: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tuition: Option<f64>,
    pub capacity: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::PrerequisiteId",
        to = "Column::CourseId"
    )]
    Prerequisite,
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_one = "super::learning_paths::Entity")]
    LearningPath,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::learning_paths::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearningPath.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::{Course, CourseStatus};
        use chrono::{DateTime, Utc};

        Course {
            status: CourseStatus::parse(&self.status).unwrap_or(CourseStatus::Draft),
            course_id: self.course_id,
            name: self.name,
            prerequisite_id: self.prerequisite_id,
            target_score: self.target_score,
            level: self.level,
            start_date: self.start_date,
            end_date: self.end_date,
            tuition: self.tuition,
            capacity: self.capacity,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
