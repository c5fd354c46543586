//! Block service - hiding members from each other.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::requester::{find_member, find_target};
use crate::domain::UserPreview;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait BlockUserService: Send + Sync {
    /// Block a member; laons between the two are removed
    async fn create_block(&self, user_id: Uuid, nickname: &str) -> AppResult<()>;

    async fn delete_block(&self, user_id: Uuid, nickname: &str) -> AppResult<()>;

    async fn find_block_users(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>>;
}

pub struct BlockUserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BlockUserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BlockUserService for BlockUserManager<U> {
    async fn create_block(&self, user_id: Uuid, nickname: &str) -> AppResult<()> {
        let users = self.uow.users();
        let me = find_member(users.as_ref(), user_id).await?;
        let target = find_target(users.as_ref(), nickname).await?;

        if target.id == me.id {
            return Err(AppError::validation("Cannot block yourself"));
        }

        let block_users = self.uow.block_users();
        if block_users.find(me.id, target.id).await?.is_some() {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                format!("'{}' is already blocked", nickname),
            ));
        }

        block_users.block(me.id, target.id).await?;
        tracing::info!(user_id = %me.id, blocked_user_id = %target.id, "User blocked");
        Ok(())
    }

    async fn delete_block(&self, user_id: Uuid, nickname: &str) -> AppResult<()> {
        let users = self.uow.users();
        let me = find_member(users.as_ref(), user_id).await?;
        let target = find_target(users.as_ref(), nickname).await?;

        let block_users = self.uow.block_users();
        let block = block_users.find(me.id, target.id).await?.ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::RowDoesNotExist,
                format!("'{}' is not blocked", nickname),
            )
        })?;

        block_users.delete(block.id).await
    }

    async fn find_block_users(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        let (blocked, total) = self
            .uow
            .block_users()
            .find_all_by_user_id(me.id, &params)
            .await?;
        Ok(Paginated::new(blocked, &params, total))
    }
}
