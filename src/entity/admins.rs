//! Administrator entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    // A + 8 digits
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_principal(self) -> crate::models::users::entities::Principal {
        use crate::models::users::entities::{Principal, Role};

        Principal {
            id: self.id,
            role: Role::Admin,
            email: self.email,
            display_name: self.full_name,
            password_hash: self.password_hash,
        }
    }
}
