//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::requester::{find_member, find_requester, find_target};
use super::token_service::Claims;
use crate::domain::{ProfileInput, UserProfileResponse, UserResponse};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::{TokenStore, UnitOfWork};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// The requester's own account
    async fn get_me(&self, user_id: Uuid) -> AppResult<UserResponse>;

    /// Replace the requester's profile fields
    async fn update_me(&self, user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse>;

    /// Delete the requester's account and revoke the token used
    async fn delete_me(&self, user_id: Uuid, claims: &Claims) -> AppResult<()>;

    /// Another user's public profile
    async fn get_profile(&self, user_id: Uuid, nickname: &str) -> AppResult<UserProfileResponse>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    token_store: Arc<dyn TokenStore>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, token_store: Arc<dyn TokenStore>) -> Self {
        Self { uow, token_store }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = find_requester(self.uow.users().as_ref(), user_id).await?;
        Ok(UserResponse::from(user))
    }

    async fn update_me(&self, user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse> {
        let users = self.uow.users();
        let user = find_member(users.as_ref(), user_id).await?;

        let nickname_changed = user.nickname.as_deref() != Some(profile.nickname.as_str());
        if nickname_changed && users.exists_by_nickname(&profile.nickname).await? {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                format!("Nickname '{}' is already in use", profile.nickname),
            ));
        }

        let user = users.update_profile(user_id, profile).await?;
        Ok(UserResponse::from(user))
    }

    async fn delete_me(&self, user_id: Uuid, claims: &Claims) -> AppResult<()> {
        let users = self.uow.users();
        find_requester(users.as_ref(), user_id).await?;

        users.delete(user_id).await?;
        self.token_store
            .blacklist(&claims.jti, claims.remaining_seconds())
            .await?;

        tracing::info!(%user_id, "Account deleted");
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid, nickname: &str) -> AppResult<UserProfileResponse> {
        let users = self.uow.users();
        let me = find_member(users.as_ref(), user_id).await?;
        let target = find_target(users.as_ref(), nickname).await?;

        if target.id == me.id {
            return Ok(UserProfileResponse::new(target, false));
        }

        if self.uow.block_users().exists_between(me.id, target.id).await? {
            return Err(AppError::unauthorized(
                ErrorCode::Blocked,
                format!("Blocked relation with '{}'", nickname),
            ));
        }

        let is_laon = self.uow.laons().find(me.id, target.id).await?.is_some();
        if target.is_private && !is_laon {
            return Err(AppError::unauthorized(
                ErrorCode::NotAccessible,
                format!("'{}' has a private profile", nickname),
            ));
        }

        Ok(UserProfileResponse::new(target, is_laon))
    }
}
