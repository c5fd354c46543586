//! Center review database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CenterReview;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "center_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rank: i16,
    pub content: String,
    pub user_id: Uuid,
    pub center_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Writer,
    #[sea_orm(
        belongs_to = "super::center::Entity",
        from = "Column::CenterId",
        to = "super::center::Column::Id",
        on_delete = "Cascade"
    )]
    Center,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Writer.def()
    }
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Center.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CenterReview {
    fn from(model: Model) -> Self {
        CenterReview {
            id: model.id,
            rank: model.rank,
            content: model.content,
            user_id: model.user_id,
            center_id: model.center_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
