//! Laon handlers.

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

pub fn laon_routes() -> Router<AppState> {
    Router::new()
        .route("/name/:nickname/laon", post(create_laon).delete(delete_laon))
        .route("/me/laon", get(find_all_laon))
}

/// Add a user to the requester's laons
#[utoipa::path(
    post,
    path = "/api/v1/users/name/{nickname}/laon",
    tag = "Laon",
    params(("nickname" = String, Path, description = "Target nickname")),
    responses(
        (status = 201, description = "Laon created", body = MessageResponse),
        (status = 400, description = "Self target or already a laon"),
        (status = 401, description = "Blocked relation"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_laon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Created<MessageResponse>> {
    state
        .laon_service
        .create_laon(current_user.id, &nickname)
        .await?;
    Ok(Created(MessageResponse::new("Laon created")))
}

/// Remove a user from the requester's laons
#[utoipa::path(
    delete,
    path = "/api/v1/users/name/{nickname}/laon",
    tag = "Laon",
    params(("nickname" = String, Path, description = "Target nickname")),
    responses(
        (status = 200, description = "Laon removed", body = MessageResponse),
        (status = 400, description = "Not a laon"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_laon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .laon_service
        .delete_laon(current_user.id, &nickname)
        .await?;
    Ok(Json(MessageResponse::new("Laon removed")))
}

/// List the requester's laons
#[utoipa::path(
    get,
    path = "/api/v1/users/me/laon",
    tag = "Laon",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of laons", body = crate::types::PaginatedUsers)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_all_laon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<UserPreview>>> {
    let page = state
        .laon_service
        .find_all_laon(current_user.id, params)
        .await?;
    Ok(Json(page))
}
