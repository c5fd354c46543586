//! Integration tests for API endpoints.
//!
//! The router runs against fake services, so no database, Redis or OAuth
//! provider is needed. The database handle is disconnected on purpose.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use claon_api::api::{create_router, AppState};
use claon_api::domain::{
    Center, CenterPreview, CenterResponse, DuplicatedCheckResponse, InstagramAccount, NewCenter,
    OAuth2Provider, ProfileInput, RankSummary, ReviewBundleResponse, ReviewResponse, User,
    UserPreview, UserProfileResponse, UserResponse,
};
use claon_api::errors::{AppError, AppResult, ErrorCode};
use claon_api::infra::{CacheStore, Database};
use claon_api::services::{
    AuthService, BlockUserService, CenterReviewService, CenterService, Claims, JwtResponse,
    LaonService, Services, TokenKind, UserService,
};
use claon_api::types::{Paginated, PaginationParams};

const USER_TOKEN: &str = "user-token";
const ADMIN_TOKEN: &str = "admin-token";

fn user_id() -> Uuid {
    Uuid::from_u128(1)
}

fn signed_up_user() -> User {
    let mut user = User::new(
        user_id(),
        "climber@example.com".to_string(),
        "oauth-1".to_string(),
        OAuth2Provider::Kakao,
    );
    user.nickname = Some("climber".to_string());
    user
}

fn claims(role: &str) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: user_id(),
        role: role.to_string(),
        typ: TokenKind::Access,
        iat: now,
        exp: now + 3600,
        jti: Uuid::new_v4().to_string(),
    }
}

fn jwt() -> JwtResponse {
    JwtResponse {
        access_token: "new-access".to_string(),
        refresh_token: "new-refresh".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        is_completed_sign_up: false,
    }
}

// =============================================================================
// Fake Services
// =============================================================================

struct FakeAuthService;

#[async_trait]
impl AuthService for FakeAuthService {
    async fn nickname_duplicate_check(&self, nickname: &str) -> AppResult<DuplicatedCheckResponse> {
        Ok(DuplicatedCheckResponse {
            result: nickname == "taken",
        })
    }

    async fn instagram_account(&self, _code: &str) -> AppResult<InstagramAccount> {
        Ok(InstagramAccount {
            oauth_id: "17841400000000000".to_string(),
            user_name: "climber.gram".to_string(),
        })
    }

    async fn sign_in(&self, _provider: OAuth2Provider, code: &str) -> AppResult<JwtResponse> {
        if code == "rejected" {
            return Err(AppError::unauthorized(ErrorCode::InvalidOauth, "Rejected"));
        }
        Ok(jwt())
    }

    async fn sign_up(&self, _user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse> {
        let mut user = signed_up_user();
        user.nickname = Some(profile.nickname);
        Ok(UserResponse::from(user))
    }

    async fn sign_out(&self, _claims: &Claims) -> AppResult<()> {
        Ok(())
    }

    async fn reissue(&self, refresh_token: &str) -> AppResult<JwtResponse> {
        if refresh_token == "used" {
            return Err(AppError::unauthorized(ErrorCode::InvalidJwt, "Unknown refresh token"));
        }
        Ok(jwt())
    }

    async fn authenticate(&self, token: &str) -> AppResult<Claims> {
        match token {
            USER_TOKEN => Ok(claims("user")),
            ADMIN_TOKEN => Ok(claims("admin")),
            _ => Err(AppError::unauthorized(ErrorCode::InvalidJwt, "Invalid token")),
        }
    }
}

struct FakeUserService;

#[async_trait]
impl UserService for FakeUserService {
    async fn get_me(&self, _user_id: Uuid) -> AppResult<UserResponse> {
        Ok(UserResponse::from(signed_up_user()))
    }

    async fn update_me(&self, _user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse> {
        let mut user = signed_up_user();
        user.nickname = Some(profile.nickname);
        Ok(UserResponse::from(user))
    }

    async fn delete_me(&self, _user_id: Uuid, _claims: &Claims) -> AppResult<()> {
        Ok(())
    }

    async fn get_profile(&self, _user_id: Uuid, nickname: &str) -> AppResult<UserProfileResponse> {
        match nickname {
            "blocker" => Err(AppError::unauthorized(ErrorCode::Blocked, "Blocked")),
            "ghost" => Err(AppError::not_found(ErrorCode::UserDoesNotExist, "No such user")),
            _ => {
                let mut user = signed_up_user();
                user.nickname = Some(nickname.to_string());
                Ok(UserProfileResponse::new(user, true))
            }
        }
    }
}

struct FakeLaonService;

#[async_trait]
impl LaonService for FakeLaonService {
    async fn create_laon(&self, _user_id: Uuid, nickname: &str) -> AppResult<()> {
        if nickname == "climber" {
            return Err(AppError::validation("Cannot laon yourself"));
        }
        Ok(())
    }

    async fn delete_laon(&self, _user_id: Uuid, _nickname: &str) -> AppResult<()> {
        Err(AppError::bad_request(ErrorCode::RowDoesNotExist, "Not a laon"))
    }

    async fn find_all_laon(
        &self,
        _user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>> {
        let preview = UserPreview {
            nickname: "friend".to_string(),
            image_path: None,
        };
        Ok(Paginated::new(vec![preview], &params, 3))
    }
}

struct FakeBlockService;

#[async_trait]
impl BlockUserService for FakeBlockService {
    async fn create_block(&self, _user_id: Uuid, _nickname: &str) -> AppResult<()> {
        Ok(())
    }

    async fn delete_block(&self, _user_id: Uuid, _nickname: &str) -> AppResult<()> {
        Ok(())
    }

    async fn find_block_users(
        &self,
        _user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<UserPreview>> {
        Ok(Paginated::new(vec![], &params, 0))
    }
}

struct FakeCenterService;

#[async_trait]
impl CenterService for FakeCenterService {
    async fn create(&self, center: NewCenter) -> AppResult<CenterResponse> {
        let now = Utc::now();
        let center = Center {
            id: Uuid::new_v4(),
            name: center.name,
            address: center.address,
            tel: center.tel,
            web_url: center.web_url,
            instagram_url: center.instagram_url,
            youtube_url: center.youtube_url,
            img_list: center.img_list,
            operating_time: center.operating_time,
            facilities: center.facilities,
            charge: center.charge,
            hold_info_img: center.hold_info_img,
            created_at: now,
            updated_at: now,
        };
        Ok(CenterResponse::new(center, RankSummary::default()))
    }

    async fn find_center(&self, _center_id: Uuid) -> AppResult<CenterResponse> {
        Err(AppError::not_found(ErrorCode::CenterDoesNotExist, "No such center"))
    }

    async fn search(
        &self,
        keyword: &str,
        params: PaginationParams,
    ) -> AppResult<Paginated<CenterPreview>> {
        let preview = CenterPreview {
            id: Uuid::new_v4(),
            name: format!("{} gym", keyword),
            address: "Seoul".to_string(),
            thumbnail: None,
        };
        Ok(Paginated::new(vec![preview], &params, 1))
    }
}

struct FakeReviewService;

#[async_trait]
impl CenterReviewService for FakeReviewService {
    async fn create_review(
        &self,
        _user_id: Uuid,
        center_id: Uuid,
        rank: i16,
        content: String,
    ) -> AppResult<ReviewResponse> {
        let now = Utc::now();
        Ok(ReviewResponse {
            review_id: Uuid::new_v4(),
            rank,
            content,
            center_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_review(
        &self,
        _user_id: Uuid,
        _review_id: Uuid,
        _rank: i16,
        _content: String,
    ) -> AppResult<ReviewResponse> {
        Err(AppError::unauthorized(ErrorCode::NotAccessible, "Not the writer"))
    }

    async fn delete_review(&self, _user_id: Uuid, _review_id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn find_review(
        &self,
        _user_id: Uuid,
        center_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<ReviewBundleResponse> {
        Ok(ReviewBundleResponse {
            center_id,
            self_review: None,
            other_reviews: Paginated::new(vec![], &params, 0),
        })
    }
}

/// Cache that admits or rejects every request
struct FakeCache {
    allow: bool,
}

#[async_trait]
impl CacheStore for FakeCache {
    async fn check_rate_limit(
        &self,
        _identifier: &str,
        max_requests: u64,
        _window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        if self.allow {
            Ok((1, true))
        } else {
            Ok((max_requests + 1, false))
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app_with_cache(cache: FakeCache) -> Router {
    let services = Services::new(
        Arc::new(FakeAuthService),
        Arc::new(FakeUserService),
        Arc::new(FakeLaonService),
        Arc::new(FakeBlockService),
        Arc::new(FakeCenterService),
        Arc::new(FakeReviewService),
    );
    let database = Database::from_connection(DatabaseConnection::Disconnected);

    create_router(AppState::new(
        &services,
        Arc::new(cache),
        Arc::new(database),
    ))
}

fn app() -> Router {
    app_with_cache(FakeCache { allow: true })
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn profile_body(nickname: &str) -> Value {
    json!({
        "nickname": nickname,
        "metropolitan_activity_area": "Seoul",
        "basic_local_activity_area": "Mapo-gu",
        "height": 172.5
    })
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let response = app()
        .oneshot(request(Method::GET, "/", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Claon API");
}

#[tokio::test]
async fn test_health_reports_disconnected_database() {
    let response = app()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert_eq!(body["services"]["redis"]["status"], "healthy");
}

#[tokio::test]
async fn test_nickname_duplicate_check() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/api/v1/auth/nickname/taken/duplicate-check",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "result": true }));
}

#[tokio::test]
async fn test_sign_in_sets_token_headers() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-in/KAKAO",
            None,
            Some(json!({ "code": "provider-token" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::AUTHORIZATION], "Bearer new-access");
    assert_eq!(response.headers()["refresh-token"], "new-refresh");
    let body = json_body(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["is_completed_sign_up"], false);
}

#[tokio::test]
async fn test_sign_in_with_unknown_provider() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-in/naver",
            None,
            Some(json!({ "code": "provider-token" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_sign_in_rejected_by_provider() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-in/google",
            None,
            Some(json!({ "code": "rejected" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_OAUTH");
    assert_eq!(body["error"]["status"], 401);
}

#[tokio::test]
async fn test_reissue_with_used_token() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/reissue",
            None,
            Some(json!({ "refresh_token": "used" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_JWT");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/reissue")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

// =============================================================================
// Authentication Middleware
// =============================================================================

#[tokio::test]
async fn test_missing_token() {
    let response = app()
        .oneshot(request(Method::GET, "/api/v1/users/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_SIGN_IN");
}

#[tokio::test]
async fn test_invalid_token() {
    let response = app()
        .oneshot(request(Method::GET, "/api/v1/users/me", Some("forged"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_JWT");
}

#[tokio::test]
async fn test_sign_up_requires_token() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-up",
            None,
            Some(profile_body("climber")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_up_marks_completed() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-up",
            Some(USER_TOKEN),
            Some(profile_body("새클라이머")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["is-completed-sign-up"], "true");
    assert_eq!(json_body(response).await["nickname"], "새클라이머");
}

#[tokio::test]
async fn test_sign_up_with_invalid_nickname() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/auth/sign-up",
            Some(USER_TOKEN),
            Some(profile_body("no spaces allowed")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let response = app_with_cache(FakeCache { allow: false })
        .oneshot(request(Method::GET, "/api/v1/users/me", Some(USER_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
    assert_eq!(json_body(response).await["error"]["code"], "TOO_MANY_REQUESTS");
}

// =============================================================================
// Users, Laons and Blocks
// =============================================================================

#[tokio::test]
async fn test_get_me() {
    let response = app()
        .oneshot(request(Method::GET, "/api/v1/users/me", Some(USER_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-RateLimit-Limit"));
    let body = json_body(response).await;
    assert_eq!(body["nickname"], "climber");
    assert_eq!(body["is_completed_sign_up"], true);
}

#[tokio::test]
async fn test_profile_of_blocker() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/api/v1/users/name/blocker",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "BLOCKED");
}

#[tokio::test]
async fn test_profile_of_unknown_user() {
    let response = app()
        .oneshot(request(Method::GET, "/api/v1/users/name/ghost", Some(USER_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "USER_DOES_NOT_EXIST");
}

#[tokio::test]
async fn test_create_laon() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/users/name/friend/laon",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_laon_to_self() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/users/name/climber/laon",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_delete_missing_laon() {
    let response = app()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/users/name/friend/laon",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "ROW_DOES_NOT_EXIST");
}

#[tokio::test]
async fn test_laon_list_pagination() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/api/v1/users/me/laon?page=2&per_page=1",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["results"][0]["nickname"], "friend");
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["previous_page"], 1);
    assert_eq!(body["next_page"], 3);
}

#[tokio::test]
async fn test_block_user() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/users/name/friend/block",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

// =============================================================================
// Centers and Reviews
// =============================================================================

#[tokio::test]
async fn test_create_center_requires_admin() {
    let body = json!({ "name": "Claon Gym", "address": "Seoul" });
    let response = app()
        .oneshot(request(Method::POST, "/api/v1/centers", Some(USER_TOKEN), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_ACCESSIBLE");
}

#[tokio::test]
async fn test_create_center_as_admin() {
    let body = json!({
        "name": "Claon Gym",
        "address": "Seoul",
        "img_list": ["https://img.example.com/1.png"],
        "operating_time": [{ "day": "Everyday", "start": "10:00", "end": "23:00" }],
        "charge": [{ "charge_list": [{ "name": "Day pass", "fee": "20,000" }], "image": null }]
    });
    let response = app()
        .oneshot(request(Method::POST, "/api/v1/centers", Some(ADMIN_TOKEN), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Claon Gym");
    assert_eq!(body["review_count"], 0);
    assert_eq!(body["operating_time"][0]["day"], "Everyday");
}

#[tokio::test]
async fn test_unknown_center() {
    let uri = format!("/api/v1/centers/{}", Uuid::new_v4());
    let response = app()
        .oneshot(request(Method::GET, &uri, Some(USER_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "CENTER_DOES_NOT_EXIST");
}

#[tokio::test]
async fn test_search_centers() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/api/v1/centers?keyword=claon&page=1",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["results"][0]["name"], "claon gym");
}

#[tokio::test]
async fn test_center_id_must_be_uuid() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/api/v1/centers/not-a-uuid/review",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_create_review() {
    let center_id = Uuid::new_v4();
    let uri = format!("/api/v1/centers/{}/review", center_id);
    let response = app()
        .oneshot(request(
            Method::POST,
            &uri,
            Some(USER_TOKEN),
            Some(json!({ "rank": 4, "content": "Fun slab problems" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["center_id"], center_id.to_string());
    assert_eq!(body["rank"], 4);
}

#[tokio::test]
async fn test_create_review_rank_out_of_range() {
    let uri = format!("/api/v1/centers/{}/review", Uuid::new_v4());
    let response = app()
        .oneshot(request(
            Method::POST,
            &uri,
            Some(USER_TOKEN),
            Some(json!({ "rank": 6, "content": "Too good" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_update_review_of_other_user() {
    let uri = format!("/api/v1/centers/review/{}", Uuid::new_v4());
    let response = app()
        .oneshot(request(
            Method::PUT,
            &uri,
            Some(USER_TOKEN),
            Some(json!({ "rank": 1, "content": "changed" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_ACCESSIBLE");
}

#[tokio::test]
async fn test_find_review_bundle() {
    let center_id = Uuid::new_v4();
    let uri = format!("/api/v1/centers/{}/review?per_page=5", center_id);
    let response = app()
        .oneshot(request(Method::GET, &uri, Some(USER_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["center_id"], center_id.to_string());
    assert!(body["self_review"].is_null());
    assert_eq!(body["other_reviews"]["per_page"], 5);
}
