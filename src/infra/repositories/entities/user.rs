//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OAuth2Provider, User, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub oauth_id: String,
    pub provider: String,
    pub role: String,
    /// NULL until sign-up is completed
    #[sea_orm(unique)]
    pub nickname: Option<String>,
    pub metropolitan_activity_area: Option<String>,
    pub basic_local_activity_area: Option<String>,
    pub image_path: Option<String>,
    pub instagram_oauth_id: Option<String>,
    pub instagram_user_name: Option<String>,
    pub height: Option<f32>,
    pub arm_reach: Option<f32>,
    pub is_private: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::center_review::Entity")]
    CenterReview,
}

impl Related<super::center_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CenterReview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        // Rows are only ever written through OAuth2Provider::as_str
        let provider = model
            .provider
            .parse::<OAuth2Provider>()
            .unwrap_or(OAuth2Provider::Google);

        User {
            id: model.id,
            email: model.email,
            oauth_id: model.oauth_id,
            provider,
            role: UserRole::from(model.role.as_str()),
            nickname: model.nickname,
            metropolitan_activity_area: model.metropolitan_activity_area,
            basic_local_activity_area: model.basic_local_activity_area,
            image_path: model.image_path,
            instagram_oauth_id: model.instagram_oauth_id,
            instagram_user_name: model.instagram_user_name,
            height: model.height,
            arm_reach: model.arm_reach,
            is_private: model.is_private,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
