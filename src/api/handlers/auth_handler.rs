//! Authentication handlers.
//!
//! Sign-in and reissue return the token pair in the body and repeat it in
//! the `Authorization` and `refresh-token` response headers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::user_handler::ProfileRequest;
use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, COMPLETED_SIGN_UP_HEADER, REFRESH_TOKEN_HEADER};
use crate::domain::{DuplicatedCheckResponse, InstagramAccount, OAuth2Provider};
use crate::errors::{AppError, AppResult};
use crate::services::JwtResponse;
use crate::types::MessageResponse;

/// Token handed over by an OAuth provider
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OAuthTokenRequest {
    /// Google ID token, Kakao or Instagram access token
    #[validate(length(min = 1, message = "code is required"))]
    #[schema(example = "ya29.a0AfH6SMB...")]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReissueRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Routes reachable without a token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/nickname/:nickname/duplicate-check",
            get(nickname_duplicate_check),
        )
        .route("/instagram/account", post(instagram_account))
        .route("/sign-in/:provider", post(sign_in))
        .route("/reissue", post(reissue))
}

/// Routes that need a signed-in user
pub fn auth_member_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-out", post(sign_out))
}

/// Body plus the token headers
fn with_token_headers(jwt: JwtResponse) -> AppResult<Response> {
    let bearer = format!("{}{}", BEARER_TOKEN_PREFIX, jwt.access_token);
    let headers = [
        (AUTHORIZATION, header_value(&bearer)?),
        (
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
            header_value(&jwt.refresh_token)?,
        ),
    ];

    Ok((headers, Json(jwt)).into_response())
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::internal(format!("Invalid header value: {}", e)))
}

/// Check whether a nickname is taken
#[utoipa::path(
    get,
    path = "/api/v1/auth/nickname/{nickname}/duplicate-check",
    tag = "Authentication",
    params(("nickname" = String, Path, description = "Nickname to check")),
    responses(
        (status = 200, description = "`result` is true when taken", body = DuplicatedCheckResponse)
    )
)]
pub async fn nickname_duplicate_check(
    State(state): State<AppState>,
    PathParam(nickname): PathParam<String>,
) -> AppResult<Json<DuplicatedCheckResponse>> {
    let response = state.auth_service.nickname_duplicate_check(&nickname).await?;
    Ok(Json(response))
}

/// Resolve the Instagram account behind an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/instagram/account",
    tag = "Authentication",
    request_body = OAuthTokenRequest,
    responses(
        (status = 200, description = "Instagram account", body = InstagramAccount),
        (status = 401, description = "Token rejected by Instagram"),
        (status = 503, description = "Instagram unavailable")
    )
)]
pub async fn instagram_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OAuthTokenRequest>,
) -> AppResult<Json<InstagramAccount>> {
    let account = state.auth_service.instagram_account(&payload.code).await?;
    Ok(Json(account))
}

/// Sign in with a provider token
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in/{provider}",
    tag = "Authentication",
    params(("provider" = String, Path, description = "google or kakao")),
    request_body = OAuthTokenRequest,
    responses(
        (status = 200, description = "Signed in", body = JwtResponse),
        (status = 400, description = "Unknown provider"),
        (status = 401, description = "Token rejected by the provider"),
        (status = 503, description = "Provider unavailable")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    PathParam(provider): PathParam<String>,
    ValidatedJson(payload): ValidatedJson<OAuthTokenRequest>,
) -> AppResult<Response> {
    let provider: OAuth2Provider = provider.parse()?;
    let jwt = state.auth_service.sign_in(provider, &payload.code).await?;
    with_token_headers(jwt)
}

/// Complete the profile of a signed-in account
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    tag = "Authentication",
    request_body = ProfileRequest,
    responses(
        (status = 201, description = "Sign-up completed", body = crate::domain::UserResponse),
        (status = 400, description = "Invalid profile, nickname taken or already signed up"),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .auth_service
        .sign_up(current_user.id, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        [(
            HeaderName::from_static(COMPLETED_SIGN_UP_HEADER),
            HeaderValue::from_static("true"),
        )],
        Json(user),
    ))
}

/// Revoke the current access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    tag = "Authentication",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<MessageResponse>> {
    state.auth_service.sign_out(&current_user.token).await?;
    Ok(Json(MessageResponse::new("Signed out")))
}

/// Exchange a refresh token for a new pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/reissue",
    tag = "Authentication",
    request_body = ReissueRequest,
    responses(
        (status = 200, description = "New token pair", body = JwtResponse),
        (status = 401, description = "Unknown, used or expired refresh token")
    )
)]
pub async fn reissue(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReissueRequest>,
) -> AppResult<Response> {
    let jwt = state.auth_service.reissue(&payload.refresh_token).await?;
    with_token_headers(jwt)
}
