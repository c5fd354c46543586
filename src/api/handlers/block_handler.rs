//! Block handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::{PathParam, QueryParams};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserPreview;
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, Paginated, PaginationParams};

pub fn block_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/name/:nickname/block",
            post(create_block).delete(delete_block),
        )
        .route("/me/block", get(find_block_users))
}

/// Block a user, severing laons in both directions
#[utoipa::path(
    post,
    path = "/api/v1/users/name/{nickname}/block",
    tag = "Block",
    params(("nickname" = String, Path, description = "Target nickname")),
    responses(
        (status = 201, description = "User blocked", body = MessageResponse),
        (status = 400, description = "Self target or already blocked"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_block(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Created<MessageResponse>> {
    state
        .block_service
        .create_block(current_user.id, &nickname)
        .await?;
    Ok(Created(MessageResponse::new("User blocked")))
}

/// Unblock a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/name/{nickname}/block",
    tag = "Block",
    params(("nickname" = String, Path, description = "Target nickname")),
    responses(
        (status = 200, description = "User unblocked", body = MessageResponse),
        (status = 400, description = "Not blocked"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_block(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .block_service
        .delete_block(current_user.id, &nickname)
        .await?;
    Ok(Json(MessageResponse::new("User unblocked")))
}

/// List users the requester blocked
#[utoipa::path(
    get,
    path = "/api/v1/users/me/block",
    tag = "Block",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of blocked users", body = crate::types::PaginatedUsers)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_block_users(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<UserPreview>>> {
    let page = state
        .block_service
        .find_block_users(current_user.id, params)
        .await?;
    Ok(Json(page))
}
