//! Center review handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{PathParam, QueryParams, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ReviewBundleResponse, ReviewResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, PaginationParams};

/// Body of review creation and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    #[validate(range(
        min = 1,
        max = 5,
        message = "rank must be between 1 and 5"
    ))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rank: i16,
    #[validate(length(
        max = 500,
        message = "content must be at most 500 characters"
    ))]
    #[schema(example = "Great setting, friendly staff", max_length = 500)]
    pub content: String,
}

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/:center_id/review", post(create_review).get(find_review))
        .route("/review/:review_id", put(update_review).delete(delete_review))
}

/// Write the requester's review of a center
#[utoipa::path(
    post,
    path = "/api/v1/centers/{center_id}/review",
    tag = "Reviews",
    params(("center_id" = Uuid, Path, description = "Center ID")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid review or already reviewed"),
        (status = 404, description = "Center not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(center_id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Created<ReviewResponse>> {
    let review = state
        .review_service
        .create_review(current_user.id, center_id, payload.rank, payload.content)
        .await?;
    Ok(Created(review))
}

/// Rewrite one of the requester's reviews
#[utoipa::path(
    put,
    path = "/api/v1/centers/review/{review_id}",
    tag = "Reviews",
    params(("review_id" = Uuid, Path, description = "Review ID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 401, description = "Not the writer"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(review_id): PathParam<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let review = state
        .review_service
        .update_review(current_user.id, review_id, payload.rank, payload.content)
        .await?;
    Ok(Json(review))
}

/// Remove one of the requester's reviews
#[utoipa::path(
    delete,
    path = "/api/v1/centers/review/{review_id}",
    tag = "Reviews",
    params(("review_id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 401, description = "Not the writer"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(review_id): PathParam<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state
        .review_service
        .delete_review(current_user.id, review_id)
        .await?;
    Ok(Json(MessageResponse::new("Review deleted")))
}

/// The requester's review and a page of other visible reviews
#[utoipa::path(
    get,
    path = "/api/v1/centers/{center_id}/review",
    tag = "Reviews",
    params(("center_id" = Uuid, Path, description = "Center ID"), PaginationParams),
    responses(
        (status = 200, description = "Review bundle", body = ReviewBundleResponse),
        (status = 404, description = "Center not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(center_id): PathParam<Uuid>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<ReviewBundleResponse>> {
    let bundle = state
        .review_service
        .find_review(current_user.id, center_id, params)
        .await?;
    Ok(Json(bundle))
}
