//! User account and profile handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Extension, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ProfileInput, UserProfileResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// 2 to 20 letters, digits, Hangul syllables or underscores
static NICKNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9가-힣_]{2,20}$").expect("nickname pattern is valid")
});

/// Profile fields set at sign-up and on update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProfileRequest {
    #[validate(regex(
        path = *NICKNAME_REGEX,
        message = "nickname must be 2-20 letters, digits, Hangul or '_'"
    ))]
    #[schema(example = "boulder_kim")]
    pub nickname: String,
    #[validate(length(min = 1, message = "metropolitan_activity_area is required"))]
    #[schema(example = "Seoul")]
    pub metropolitan_activity_area: String,
    #[validate(length(min = 1, message = "basic_local_activity_area is required"))]
    #[schema(example = "Mapo-gu")]
    pub basic_local_activity_area: String,
    pub image_path: Option<String>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "height must be in (0, 300]"
    ))]
    #[schema(example = 172.5)]
    pub height: Option<f32>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "arm_reach must be in (0, 300]"
    ))]
    #[schema(example = 178.0)]
    pub arm_reach: Option<f32>,
    pub instagram_oauth_id: Option<String>,
    pub instagram_user_name: Option<String>,
    pub is_private: Option<bool>,
}

impl From<ProfileRequest> for ProfileInput {
    fn from(request: ProfileRequest) -> Self {
        Self {
            nickname: request.nickname,
            metropolitan_activity_area: request.metropolitan_activity_area,
            basic_local_activity_area: request.basic_local_activity_area,
            image_path: request.image_path,
            instagram_oauth_id: request.instagram_oauth_id,
            instagram_user_name: request.instagram_user_name,
            height: request.height,
            arm_reach: request.arm_reach,
            is_private: request.is_private,
        }
    }
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route("/name/:nickname", get(get_profile))
}

/// Get the signed-in user's account
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Own account", body = UserResponse),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_me(current_user.id).await?;
    Ok(Json(user))
}

/// Update the signed-in user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "Users",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid profile or nickname taken"),
        (status = 401, description = "Not signed in or not signed up")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_me(current_user.id, payload.into())
        .await?;
    Ok(Json(user))
}

/// Delete the signed-in user's account
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .delete_me(current_user.id, &current_user.token)
        .await?;
    Ok(Json(MessageResponse::new("Account deleted")))
}

/// Get another user's public profile
#[utoipa::path(
    get,
    path = "/api/v1/users/name/{nickname}",
    tag = "Users",
    params(("nickname" = String, Path, description = "Target nickname")),
    responses(
        (status = 200, description = "Public profile", body = UserProfileResponse),
        (status = 401, description = "Blocked or private profile"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = state
        .user_service
        .get_profile(current_user.id, &nickname)
        .await?;
    Ok(Json(profile))
}
