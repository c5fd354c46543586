//! Center review domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::types::Paginated;

/// A user's review of a center. At most one per (user, center).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterReview {
    pub id: Uuid,
    pub rank: i16,
    pub content: String,
    pub user_id: Uuid,
    pub center_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CenterReview {
    pub fn is_written_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Review joined with its writer's public fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDetail {
    pub review: CenterReview,
    pub writer_nickname: String,
    pub writer_image_path: Option<String>,
}

/// Review as returned after a write
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    #[schema(example = 5)]
    pub rank: i16,
    #[schema(example = "Great setting, friendly staff")]
    pub content: String,
    pub center_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CenterReview> for ReviewResponse {
    fn from(review: CenterReview) -> Self {
        Self {
            review_id: review.id,
            rank: review.rank,
            content: review.content,
            center_id: review.center_id,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Review as listed on a center page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewFindResponse {
    pub review_id: Uuid,
    pub rank: i16,
    pub content: String,
    pub writer_nickname: String,
    pub writer_image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReviewDetail> for ReviewFindResponse {
    fn from(detail: ReviewDetail) -> Self {
        Self {
            review_id: detail.review.id,
            rank: detail.review.rank,
            content: detail.review.content,
            writer_nickname: detail.writer_nickname,
            writer_image_path: detail.writer_image_path,
            created_at: detail.review.created_at,
            updated_at: detail.review.updated_at,
        }
    }
}

/// The requester's own review plus a page of everybody else's
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewBundleResponse {
    pub center_id: Uuid,
    pub self_review: Option<ReviewFindResponse>,
    #[schema(value_type = PaginatedReviews)]
    pub other_reviews: Paginated<ReviewFindResponse>,
}
