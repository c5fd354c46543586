//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::ROLE_USER;
use crate::domain::{OAuth2Provider, OAuthIdentity, ProfileInput, User};
use crate::errors::{AppError, AppResult, ErrorCode};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact nickname
    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>>;

    /// Find the account bound to a provider identity
    async fn find_by_oauth(
        &self,
        provider: OAuth2Provider,
        oauth_id: &str,
    ) -> AppResult<Option<User>>;

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool>;

    /// Create an account that has not completed sign-up yet
    async fn create(&self, provider: OAuth2Provider, identity: OAuthIdentity) -> AppResult<User>;

    /// Overwrite the profile fields of an account
    async fn update_profile(&self, id: Uuid, profile: ProfileInput) -> AppResult<User>;

    /// Delete the account; reviews, laons and blocks go with it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_oauth(
        &self,
        provider: OAuth2Provider,
        oauth_id: &str,
    ) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Provider.eq(provider.as_str()))
            .filter(user::Column::OauthId.eq(oauth_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(&self, provider: OAuth2Provider, identity: OAuthIdentity) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(identity.email),
            oauth_id: Set(identity.oauth_id),
            provider: Set(provider.as_str().to_string()),
            role: Set(ROLE_USER.to_string()),
            nickname: Set(None),
            metropolitan_activity_area: Set(None),
            basic_local_activity_area: Set(None),
            image_path: Set(None),
            instagram_oauth_id: Set(None),
            instagram_user_name: Set(None),
            height: Set(None),
            arm_reach: Set(None),
            is_private: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_profile(&self, id: Uuid, profile: ProfileInput) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::UserDoesNotExist, "User does not exist")
            })?;

        let mut active: ActiveModel = user.into();
        active.nickname = Set(Some(profile.nickname));
        active.metropolitan_activity_area = Set(Some(profile.metropolitan_activity_area));
        active.basic_local_activity_area = Set(Some(profile.basic_local_activity_area));
        active.image_path = Set(profile.image_path);
        active.instagram_oauth_id = Set(profile.instagram_oauth_id);
        active.instagram_user_name = Set(profile.instagram_user_name);
        active.height = Set(profile.height);
        active.arm_reach = Set(profile.arm_reach);
        if let Some(is_private) = profile.is_private {
            active.is_private = Set(is_private);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(
                ErrorCode::UserDoesNotExist,
                "User does not exist",
            ));
        }

        Ok(())
    }
}
