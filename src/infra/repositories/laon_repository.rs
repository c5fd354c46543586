//! Laon repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use super::block_user_repository::{blockers_of, UserPreviewRow};
use super::entities::laon::{self, ActiveModel, Entity as LaonEntity};
use super::entities::user;
use crate::domain::{Laon, UserPreview};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LaonRepository: Send + Sync {
    /// Laon of `laon_id` kept by `user_id`, if any
    async fn find(&self, user_id: Uuid, laon_id: Uuid) -> AppResult<Option<Laon>>;

    async fn create(&self, user_id: Uuid, laon_id: Uuid) -> AppResult<Laon>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Laons of `user_id`, skipping users who blocked `user_id`
    async fn find_all_by_user_id(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<UserPreview>, u64)>;
}

/// Nicknames and images of the users `user_id` follows, minus those who
/// blocked `user_id`
fn laon_list_query(user_id: Uuid) -> Select<LaonEntity> {
    LaonEntity::find()
        .select_only()
        .column(user::Column::Nickname)
        .column(user::Column::ImagePath)
        .join(JoinType::InnerJoin, laon::Relation::Target.def())
        .filter(laon::Column::UserId.eq(user_id))
        .filter(laon::Column::LaonId.not_in_subquery(blockers_of(user_id)))
        .order_by_asc(user::Column::Nickname)
}

/// Concrete implementation of LaonRepository
pub struct LaonStore {
    db: DatabaseConnection,
}

impl LaonStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LaonRepository for LaonStore {
    async fn find(&self, user_id: Uuid, laon_id: Uuid) -> AppResult<Option<Laon>> {
        let result = LaonEntity::find()
            .filter(laon::Column::UserId.eq(user_id))
            .filter(laon::Column::LaonId.eq(laon_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Laon::from))
    }

    async fn create(&self, user_id: Uuid, laon_id: Uuid) -> AppResult<Laon> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            laon_id: Set(laon_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Laon::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        LaonEntity::delete_by_id(id)
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
        let paginator = laon_list_query(user_id)
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
