//! Block repository implementation.
//!
//! Blocking runs inside a transaction because it also severs laon
//! relations in both directions.

use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Query, SelectStatement};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DeleteMany, EntityTrait, FromQueryResult, IsolationLevel, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::block_user::{self, ActiveModel, Entity as BlockUserEntity};
use super::entities::{laon, user};
use crate::domain::{BlockUser, UserPreview};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlockUserRepository: Send + Sync {
    /// Block of `blocked_user_id` by `user_id`, if any
    async fn find(&self, user_id: Uuid, blocked_user_id: Uuid) -> AppResult<Option<BlockUser>>;

    /// Whether either user has blocked the other
    async fn exists_between(&self, a: Uuid, b: Uuid) -> AppResult<bool>;

    /// Insert the block and drop laons between the two users atomically
    async fn block(&self, user_id: Uuid, blocked_user_id: Uuid) -> AppResult<BlockUser>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Users blocked by `user_id`, ordered by nickname
    async fn find_all_by_user_id(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<UserPreview>, u64)>;
}

/// `SELECT blocked_user_id FROM block_users WHERE user_id = :user_id`
pub(super) fn blocked_by(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(block_user::Column::BlockedUserId)
        .from(BlockUserEntity)
        .and_where(block_user::Column::UserId.eq(user_id))
        .to_owned()
}

/// `SELECT user_id FROM block_users WHERE blocked_user_id = :user_id`
pub(super) fn blockers_of(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(block_user::Column::UserId)
        .from(BlockUserEntity)
        .and_where(block_user::Column::BlockedUserId.eq(user_id))
        .to_owned()
}

/// Laons between `a` and `b`, whichever side follows
fn laons_between(a: Uuid, b: Uuid) -> DeleteMany<laon::Entity> {
    laon::Entity::delete_many().filter(
        Condition::any()
            .add(
                Condition::all()
                    .add(laon::Column::UserId.eq(a))
                    .add(laon::Column::LaonId.eq(b)),
            )
            .add(
                Condition::all()
                    .add(laon::Column::UserId.eq(b))
                    .add(laon::Column::LaonId.eq(a)),
            ),
    )
}

fn blocked_list_query(user_id: Uuid) -> Select<BlockUserEntity> {
    BlockUserEntity::find()
        .select_only()
        .column(user::Column::Nickname)
        .column(user::Column::ImagePath)
        .join(JoinType::InnerJoin, block_user::Relation::Blocked.def())
        .filter(block_user::Column::UserId.eq(user_id))
        .order_by_asc(user::Column::Nickname)
}

/// Nickname and image of a related user
#[derive(Debug, FromQueryResult)]
pub(super) struct UserPreviewRow {
    nickname: Option<String>,
    image_path: Option<String>,
}

impl From<UserPreviewRow> for UserPreview {
    fn from(row: UserPreviewRow) -> Self {
        UserPreview {
            nickname: row.nickname.unwrap_or_default(),
            image_path: row.image_path,
        }
    }
}

/// Concrete implementation of BlockUserRepository
pub struct BlockUserStore {
    db: DatabaseConnection,
}

impl BlockUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn block_in(
        txn: &DatabaseTransaction,
        user_id: Uuid,
        blocked_user_id: Uuid,
    ) -> AppResult<BlockUser> {
        laons_between(user_id, blocked_user_id).exec(txn).await?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            blocked_user_id: Set(blocked_user_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(txn).await?;
        Ok(BlockUser::from(model))
    }
}

#[async_trait]
impl BlockUserRepository for BlockUserStore {
    async fn find(&self, user_id: Uuid, blocked_user_id: Uuid) -> AppResult<Option<BlockUser>> {
        let result = BlockUserEntity::find()
            .filter(block_user::Column::UserId.eq(user_id))
            .filter(block_user::Column::BlockedUserId.eq(blocked_user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(BlockUser::from))
    }

    async fn exists_between(&self, a: Uuid, b: Uuid) -> AppResult<bool> {
        let count = BlockUserEntity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(block_user::Column::UserId.eq(a))
                            .add(block_user::Column::BlockedUserId.eq(b)),
                    )
                    .add(
                        Condition::all()
                            .add(block_user::Column::UserId.eq(b))
                            .add(block_user::Column::BlockedUserId.eq(a)),
                    ),
            )
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn block(&self, user_id: Uuid, blocked_user_id: Uuid) -> AppResult<BlockUser> {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        match Self::block_in(&txn, user_id, blocked_user_id).await {
            Ok(block) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(block)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        BlockUserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn find_all_by_user_id(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<UserPreview>, u64)> {
        let paginator = blocked_list_query(user_id)
            .into_model::<UserPreviewRow>()
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page_index())
            .await
            .map_err(AppError::from)?;

        Ok((rows.into_iter().map(UserPreview::from).collect(), total))
    }
}
