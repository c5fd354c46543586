//! Authentication service - OAuth sign-in, sign-up and token lifecycle.
//!
//! Sign-in trusts the OAuth provider for identity and issues this service's
//! own JWT pair. Refresh tokens are single-use: reissuing consumes the stored
//! entry. Signing out blacklists the access token until it would expire.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::requester::find_requester;
use super::token_service::{Claims, IssuedTokens, TokenKind, TokenProvider};
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{
    DuplicatedCheckResponse, InstagramAccount, OAuth2Provider, ProfileInput, User, UserResponse,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::{OAuthClient, TokenStore, UnitOfWork};

/// Token pair returned by sign-in and reissue
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JwtResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
    pub is_completed_sign_up: bool,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// `true` when the nickname is already taken
    async fn nickname_duplicate_check(&self, nickname: &str) -> AppResult<DuplicatedCheckResponse>;

    /// Resolve the Instagram account behind an Instagram access token
    async fn instagram_account(&self, code: &str) -> AppResult<InstagramAccount>;

    /// Verify a provider token, load or create the account and issue tokens
    async fn sign_in(&self, provider: OAuth2Provider, code: &str) -> AppResult<JwtResponse>;

    /// Complete the profile of a signed-in account
    async fn sign_up(&self, user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse>;

    /// Revoke the access token described by `claims`
    async fn sign_out(&self, claims: &Claims) -> AppResult<()>;

    /// Exchange a refresh token for a new pair
    async fn reissue(&self, refresh_token: &str) -> AppResult<JwtResponse>;

    /// Validate an access token for a request
    async fn authenticate(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenProvider,
    token_store: Arc<dyn TokenStore>,
    oauth: Arc<dyn OAuthClient>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(
        uow: Arc<U>,
        tokens: TokenProvider,
        token_store: Arc<dyn TokenStore>,
        oauth: Arc<dyn OAuthClient>,
    ) -> Self {
        Self {
            uow,
            tokens,
            token_store,
            oauth,
        }
    }

    /// Sign a new pair for `user` and register its refresh token
    async fn issue_for(&self, user: &User) -> AppResult<JwtResponse> {
        let IssuedTokens {
            access_token,
            refresh_token,
            refresh_claims,
            expires_in,
        } = self.tokens.issue(user)?;

        self.token_store
            .save_refresh_token(
                &refresh_claims.jti,
                user.id,
                refresh_claims.remaining_seconds(),
            )
            .await?;

        Ok(JwtResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            is_completed_sign_up: user.is_completed_sign_up(),
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn nickname_duplicate_check(&self, nickname: &str) -> AppResult<DuplicatedCheckResponse> {
        let result = self.uow.users().exists_by_nickname(nickname).await?;
        Ok(DuplicatedCheckResponse { result })
    }

    async fn instagram_account(&self, code: &str) -> AppResult<InstagramAccount> {
        self.oauth.fetch_instagram_account(code).await
    }

    async fn sign_in(&self, provider: OAuth2Provider, code: &str) -> AppResult<JwtResponse> {
        let identity = self.oauth.fetch_identity(provider, code).await?;

        let users = self.uow.users();
        let user = match users.find_by_oauth(provider, &identity.oauth_id).await? {
            Some(user) => user,
            None => {
                let user = users.create(provider, identity).await?;
                tracing::info!(user_id = %user.id, %provider, "New account created");
                user
            }
        };

        self.issue_for(&user).await
    }

    async fn sign_up(&self, user_id: Uuid, profile: ProfileInput) -> AppResult<UserResponse> {
        let users = self.uow.users();
        let user = find_requester(users.as_ref(), user_id).await?;

        if user.is_completed_sign_up() {
            return Err(AppError::bad_request(
                ErrorCode::AlreadySignedUp,
                "Sign-up has already been completed",
            ));
        }

        if users.exists_by_nickname(&profile.nickname).await? {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                format!("Nickname '{}' is already in use", profile.nickname),
            ));
        }

        let user = users.update_profile(user_id, profile).await?;
        tracing::info!(user_id = %user.id, "Sign-up completed");

        Ok(UserResponse::from(user))
    }

    async fn sign_out(&self, claims: &Claims) -> AppResult<()> {
        self.token_store
            .blacklist(&claims.jti, claims.remaining_seconds())
            .await
    }

    async fn reissue(&self, refresh_token: &str) -> AppResult<JwtResponse> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;

        let owner = self.token_store.take_refresh_token(&claims.jti).await?;
        if owner != Some(claims.sub) {
            return Err(AppError::unauthorized(
                ErrorCode::InvalidJwt,
                "Refresh token is no longer valid",
            ));
        }

        let user = find_requester(self.uow.users().as_ref(), claims.sub).await?;
        self.issue_for(&user).await
    }

    async fn authenticate(&self, token: &str) -> AppResult<Claims> {
        let claims = self.tokens.verify(token, TokenKind::Access)?;

        if self.token_store.is_blacklisted(&claims.jti).await? {
            return Err(AppError::unauthorized(
                ErrorCode::InvalidJwt,
                "Token has been signed out",
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::OAuthIdentity;
    use crate::infra::{MockOAuthClient, MockTokenStore};
    use crate::services::test_support::{member, TestUnitOfWork};
    use mockall::predicate::eq;

    fn token_provider() -> TokenProvider {
        TokenProvider::new(&Config::with_secret("a".repeat(32)).unwrap())
    }

    fn service(
        uow: TestUnitOfWork,
        store: MockTokenStore,
        oauth: MockOAuthClient,
    ) -> Authenticator<impl UnitOfWork> {
        Authenticator::new(uow.build(), token_provider(), Arc::new(store), Arc::new(oauth))
    }

    fn profile(nickname: &str) -> ProfileInput {
        ProfileInput {
            nickname: nickname.to_string(),
            metropolitan_activity_area: "Seoul".to_string(),
            basic_local_activity_area: "Mapo-gu".to_string(),
            image_path: None,
            instagram_oauth_id: None,
            instagram_user_name: None,
            height: Some(175.0),
            arm_reach: Some(180.0),
            is_private: None,
        }
    }

    #[tokio::test]
    async fn test_sign_in_creates_incomplete_account() {
        let mut oauth = MockOAuthClient::new();
        oauth
            .expect_fetch_identity()
            .withf(|provider, code| *provider == OAuth2Provider::Kakao && code == "kakao-token")
            .returning(|_, _| {
                Ok(OAuthIdentity {
                    oauth_id: "123".to_string(),
                    email: "new@example.com".to_string(),
                })
            });

        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_oauth()
            .returning(|_, _| Ok(None));
        uow.users.expect_create().times(1).returning(|provider, identity| {
            Ok(User::new(Uuid::new_v4(), identity.email, identity.oauth_id, provider))
        });

        let mut store = MockTokenStore::new();
        store
            .expect_save_refresh_token()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = service(uow, store, oauth)
            .sign_in(OAuth2Provider::Kakao, "kakao-token")
            .await
            .unwrap();

        assert!(!response.is_completed_sign_up);
        assert_eq!(response.token_type, "Bearer");
        assert_ne!(response.access_token, response.refresh_token);
    }

    #[tokio::test]
    async fn test_sign_in_propagates_provider_rejection() {
        let mut oauth = MockOAuthClient::new();
        oauth.expect_fetch_identity().returning(|_, _| {
            Err(AppError::unauthorized(ErrorCode::InvalidOauth, "rejected"))
        });

        let result = service(TestUnitOfWork::default(), MockTokenStore::new(), oauth)
            .sign_in(OAuth2Provider::Google, "bad")
            .await;

        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidOauth);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_completed_account() {
        let user = member("done");
        let mut uow = TestUnitOfWork::default();
        let found = user.clone();
        uow.users
            .expect_find_by_id()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(found.clone())));

        let result = service(uow, MockTokenStore::new(), MockOAuthClient::new())
            .sign_up(user.id, profile("other"))
            .await;

        assert_eq!(result.unwrap_err().code(), ErrorCode::AlreadySignedUp);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_nickname() {
        let user = User::new(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "1".to_string(),
            OAuth2Provider::Google,
        );
        let mut uow = TestUnitOfWork::default();
        let found = user.clone();
        uow.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        uow.users
            .expect_exists_by_nickname()
            .with(eq("taken"))
            .returning(|_| Ok(true));

        let err = service(uow, MockTokenStore::new(), MockOAuthClient::new())
            .sign_up(user.id, profile("taken"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::RowAlreadyExist);
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sign_up_completes_profile() {
        let user = User::new(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "1".to_string(),
            OAuth2Provider::Google,
        );
        let mut uow = TestUnitOfWork::default();
        let found = user.clone();
        uow.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        uow.users.expect_exists_by_nickname().returning(|_| Ok(false));
        let base = user.clone();
        uow.users.expect_update_profile().returning(move |_, profile| {
            let mut updated = base.clone();
            updated.nickname = Some(profile.nickname);
            updated.height = profile.height;
            Ok(updated)
        });

        let response = service(uow, MockTokenStore::new(), MockOAuthClient::new())
            .sign_up(user.id, profile("boulder_kim"))
            .await
            .unwrap();

        assert!(response.is_completed_sign_up);
        assert_eq!(response.nickname.as_deref(), Some("boulder_kim"));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_blacklisted_token() {
        let tokens = token_provider().issue(&member("kim")).unwrap();

        let mut store = MockTokenStore::new();
        store.expect_is_blacklisted().returning(|_| Ok(true));

        let err = service(TestUnitOfWork::default(), store, MockOAuthClient::new())
            .authenticate(&tokens.access_token)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidJwt);
    }

    #[tokio::test]
    async fn test_sign_out_blacklists_for_remaining_lifetime() {
        let tokens = token_provider().issue(&member("kim")).unwrap();
        let claims = token_provider()
            .verify(&tokens.access_token, TokenKind::Access)
            .unwrap();

        let mut store = MockTokenStore::new();
        let jti = claims.jti.clone();
        store
            .expect_blacklist()
            .withf(move |id, ttl| id == jti && *ttl > 3500 && *ttl <= 3600)
            .times(1)
            .returning(|_, _| Ok(()));

        service(TestUnitOfWork::default(), store, MockOAuthClient::new())
            .sign_out(&claims)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reissue_consumes_refresh_token() {
        let user = member("kim");
        let tokens = token_provider().issue(&user).unwrap();

        let mut store = MockTokenStore::new();
        let owner = user.id;
        store
            .expect_take_refresh_token()
            .with(eq(tokens.refresh_claims.jti.clone()))
            .times(1)
            .returning(move |_| Ok(Some(owner)));
        store
            .expect_save_refresh_token()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut uow = TestUnitOfWork::default();
        let found = user.clone();
        uow.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let response = service(uow, store, MockOAuthClient::new())
            .reissue(&tokens.refresh_token)
            .await
            .unwrap();

        assert!(response.is_completed_sign_up);
    }

    #[tokio::test]
    async fn test_reissue_with_used_refresh_token_fails() {
        let tokens = token_provider().issue(&member("kim")).unwrap();

        let mut store = MockTokenStore::new();
        store.expect_take_refresh_token().returning(|_| Ok(None));

        let err = service(TestUnitOfWork::default(), store, MockOAuthClient::new())
            .reissue(&tokens.refresh_token)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidJwt);
    }

    #[tokio::test]
    async fn test_reissue_rejects_access_token() {
        let tokens = token_provider().issue(&member("kim")).unwrap();

        let err = service(TestUnitOfWork::default(), MockTokenStore::new(), MockOAuthClient::new())
            .reissue(&tokens.access_token)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidJwt);
    }
}
