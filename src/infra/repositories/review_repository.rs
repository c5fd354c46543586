//! Center review repository implementation.
//!
//! Listing queries join the writer's public fields and hide reviews whose
//! writer is on either side of a block with the requester.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::block_user_repository::{blocked_by, blockers_of};
use super::entities::center_review::{self, ActiveModel, Entity as ReviewEntity};
use super::entities::user;
use crate::domain::{CenterReview, RankSummary, ReviewDetail};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CenterReview>>;

    async fn find_by_user_and_center(
        &self,
        user_id: Uuid,
        center_id: Uuid,
    ) -> AppResult<Option<CenterReview>>;

    /// The requester's own review with writer fields attached
    async fn find_detail_by_user_and_center(
        &self,
        user_id: Uuid,
        center_id: Uuid,
    ) -> AppResult<Option<ReviewDetail>>;

    async fn create(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<CenterReview>;

    async fn update(&self, id: Uuid, rank: i16, content: String) -> AppResult<CenterReview>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Reviews of a center, newest first, excluding the requester's own and
    /// those of users blocked in either direction
    async fn find_by_center_except_block_user_and_self(
        &self,
        center_id: Uuid,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<ReviewDetail>, u64)>;

    /// Review count and average rank of a center
    async fn rank_summary(&self, center_id: Uuid) -> AppResult<RankSummary>;
}

/// Flat projection of a review joined with its writer
#[derive(Debug, FromQueryResult)]
struct ReviewDetailRow {
    id: Uuid,
    rank: i16,
    content: String,
    user_id: Uuid,
    center_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    writer_nickname: Option<String>,
    writer_image_path: Option<String>,
}

impl From<ReviewDetailRow> for ReviewDetail {
    fn from(row: ReviewDetailRow) -> Self {
        ReviewDetail {
            review: CenterReview {
                id: row.id,
                rank: row.rank,
                content: row.content,
                user_id: row.user_id,
                center_id: row.center_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            writer_nickname: row.writer_nickname.unwrap_or_default(),
            writer_image_path: row.writer_image_path,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct RankSummaryRow {
    review_count: i64,
    rank_avg: Option<f64>,
}

/// Concrete implementation of ReviewRepository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Review columns plus the writer's nickname and image
    fn detail_query() -> Select<ReviewEntity> {
        ReviewEntity::find()
            .inner_join(user::Entity)
            .column_as(user::Column::Nickname, "writer_nickname")
            .column_as(user::Column::ImagePath, "writer_image_path")
    }

    /// Reviews of `center_id` newest first, without the requester's own and
    /// without writers on either side of a block with the requester
    fn others_query(center_id: Uuid, user_id: Uuid) -> Select<ReviewEntity> {
        Self::detail_query()
            .filter(center_review::Column::CenterId.eq(center_id))
            .filter(center_review::Column::UserId.ne(user_id))
            .filter(center_review::Column::UserId.not_in_subquery(blocked_by(user_id)))
            .filter(center_review::Column::UserId.not_in_subquery(blockers_of(user_id)))
            .order_by_desc(center_review::Column::CreatedAt)
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CenterReview>> {
        let result = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CenterReview::from))
    }

    async fn find_by_user_and_center(
        &self,
        user_id: Uuid,
        center_id: Uuid,
    ) -> AppResult<Option<CenterReview>> {
        let result = ReviewEntity::find()
            .filter(center_review::Column::UserId.eq(user_id))
            .filter(center_review::Column::CenterId.eq(center_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CenterReview::from))
    }

    async fn find_detail_by_user_and_center(
        &self,
        user_id: Uuid,
        center_id: Uuid,
    ) -> AppResult<Option<ReviewDetail>> {
        let result = Self::detail_query()
            .filter(center_review::Column::UserId.eq(user_id))
            .filter(center_review::Column::CenterId.eq(center_id))
            .into_model::<ReviewDetailRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ReviewDetail::from))
    }

    async fn create(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<CenterReview> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            rank: Set(rank),
            content: Set(content),
            user_id: Set(user_id),
            center_id: Set(center_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(CenterReview::from(model))
    }

    async fn update(&self, id: Uuid, rank: i16, content: String) -> AppResult<CenterReview> {
        let review = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::ReviewDoesNotExist, "Review does not exist")
            })?;

        let mut active: ActiveModel = review.into();
        active.rank = Set(rank);
        active.content = Set(content);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(CenterReview::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        ReviewEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn find_by_center_except_block_user_and_self(
        &self,
        center_id: Uuid,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<ReviewDetail>, u64)> {
        let paginator = Self::others_query(center_id, user_id)
            .into_model::<ReviewDetailRow>()
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page_index())
            .await
            .map_err(AppError::from)?;

        Ok((rows.into_iter().map(ReviewDetail::from).collect(), total))
    }

    async fn rank_summary(&self, center_id: Uuid) -> AppResult<RankSummary> {
        let row = ReviewEntity::find()
            .select_only()
            .column_as(Expr::col(center_review::Column::Id).count(), "review_count")
            .column_as(
                SimpleExpr::from(Func::cast_as(
                    Func::avg(Expr::col(center_review::Column::Rank)),
                    Alias::new("float8"),
                )),
                "rank_avg",
            )
            .filter(center_review::Column::CenterId.eq(center_id))
            .into_model::<RankSummaryRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row
            .map(|row| RankSummary {
                review_count: u64::try_from(row.review_count).unwrap_or_default(),
                rank_avg: row.rank_avg,
            })
            .unwrap_or_default())
    }
}
