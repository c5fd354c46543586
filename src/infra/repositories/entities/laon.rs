//! Laon database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Laon;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "laons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owner of the relation
    pub user_id: Uuid,
    /// The user being followed
    pub laon_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LaonId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Target,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Laon {
    fn from(model: Model) -> Self {
        Laon {
            id: model.id,
            user_id: model.user_id,
            laon_id: model.laon_id,
            created_at: model.created_at,
        }
    }
}
