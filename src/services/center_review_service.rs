//! Center review service.
//!
//! A member writes at most one review per center. Only the writer may
//! change or remove it, and listings hide reviews across a block in either
//! direction.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::requester::find_member;
use crate::domain::{CenterReview, ReviewBundleResponse, ReviewFindResponse, ReviewResponse};
use crate::errors::{AppError, AppResult, ErrorCode, OptionExt};
use crate::infra::{ReviewRepository, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait CenterReviewService: Send + Sync {
    async fn create_review(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<ReviewResponse>;

    async fn update_review(
        &self,
        user_id: Uuid,
        review_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<ReviewResponse>;

    async fn delete_review(&self, user_id: Uuid, review_id: Uuid) -> AppResult<()>;

    /// The requester's own review plus a page of the visible others
    async fn find_review(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<ReviewBundleResponse>;
}

pub struct CenterReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CenterReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_owned_review(
        &self,
        reviews: &dyn ReviewRepository,
        user_id: Uuid,
        review_id: Uuid,
    ) -> AppResult<CenterReview> {
        let review = reviews
            .find_by_id(review_id)
            .await?
            .ok_or_not_found(ErrorCode::ReviewDoesNotExist, "Review does not exist")?;

        if !review.is_written_by(user_id) {
            return Err(AppError::unauthorized(
                ErrorCode::NotAccessible,
                "Only the writer can modify this review",
            ));
        }

        Ok(review)
    }

    async fn ensure_center_exists(&self, center_id: Uuid) -> AppResult<()> {
        self.uow
            .centers()
            .find_by_id(center_id)
            .await?
            .ok_or_not_found(ErrorCode::CenterDoesNotExist, "Center does not exist")
            .map(|_| ())
    }
}

#[async_trait]
impl<U: UnitOfWork> CenterReviewService for CenterReviewManager<U> {
    async fn create_review(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<ReviewResponse> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        self.ensure_center_exists(center_id).await?;

        let reviews = self.uow.reviews();
        if reviews
            .find_by_user_and_center(me.id, center_id)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                "A review for this center already exists",
            ));
        }

        let review = reviews.create(me.id, center_id, rank, content).await?;
        tracing::debug!(review_id = %review.id, %center_id, "Review created");
        Ok(ReviewResponse::from(review))
    }

    async fn update_review(
        &self,
        user_id: Uuid,
        review_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<ReviewResponse> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        let reviews = self.uow.reviews();
        let review = self
            .find_owned_review(reviews.as_ref(), me.id, review_id)
            .await?;

        let review = reviews.update(review.id, rank, content).await?;
        Ok(ReviewResponse::from(review))
    }

    async fn delete_review(&self, user_id: Uuid, review_id: Uuid) -> AppResult<()> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        let reviews = self.uow.reviews();
        let review = self
            .find_owned_review(reviews.as_ref(), me.id, review_id)
            .await?;

        reviews.delete(review.id).await
    }

    async fn find_review(
        &self,
        user_id: Uuid,
        center_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<ReviewBundleResponse> {
        let me = find_member(self.uow.users().as_ref(), user_id).await?;
        self.ensure_center_exists(center_id).await?;

        let reviews = self.uow.reviews();
        let (self_review, (others, total)) = tokio::try_join!(
            reviews.find_detail_by_user_and_center(me.id, center_id),
            reviews.find_by_center_except_block_user_and_self(center_id, me.id, &params),
        )?;

        Ok(ReviewBundleResponse {
            center_id,
            self_review: self_review.map(ReviewFindResponse::from),
            other_reviews: Paginated::new(others, &params, total).map(ReviewFindResponse::from),
        })
    }
}
