//! OAuth provider client.
//!
//! Verifies provider tokens by asking the provider who owns them. A rejected
//! token maps to `INVALID_OAUTH`; an unreachable provider or an unexpected
//! response maps to `OAUTH_PROVIDER_UNAVAILABLE`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{
    Config, GOOGLE_TOKEN_INFO_URL, INSTAGRAM_USER_INFO_URL, KAKAO_USER_INFO_URL,
    OAUTH_HTTP_TIMEOUT_SECONDS,
};
use crate::domain::{InstagramAccount, OAuth2Provider, OAuthIdentity};
use crate::errors::{AppError, AppResult, ErrorCode};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Resolve the account behind a Google ID token or a Kakao access token
    async fn fetch_identity(&self, provider: OAuth2Provider, token: &str)
        -> AppResult<OAuthIdentity>;

    /// Resolve the Instagram account behind an Instagram access token
    async fn fetch_instagram_account(&self, token: &str) -> AppResult<InstagramAccount>;
}

#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    aud: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoUser {
    id: i64,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstagramUser {
    id: String,
    username: String,
}

/// reqwest-backed implementation of OAuthClient
pub struct HttpOAuthClient {
    client: Client,
    google_client_id: Option<String>,
}

impl HttpOAuthClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(OAUTH_HTTP_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            google_client_id: config.google_client_id.clone(),
        })
    }

    async fn google_identity(&self, id_token: &str) -> AppResult<OAuthIdentity> {
        let request = self
            .client
            .get(GOOGLE_TOKEN_INFO_URL)
            .query(&[("id_token", id_token)]);
        let info: GoogleTokenInfo = send(request, OAuth2Provider::Google.as_str()).await?;

        if let Some(expected) = &self.google_client_id {
            if info.aud.as_deref() != Some(expected.as_str()) {
                return Err(invalid_oauth("Google token was issued for another client"));
            }
        }

        Ok(OAuthIdentity {
            oauth_id: info.sub,
            email: info.email.unwrap_or_default(),
        })
    }

    async fn kakao_identity(&self, access_token: &str) -> AppResult<OAuthIdentity> {
        let request = self.client.get(KAKAO_USER_INFO_URL).bearer_auth(access_token);
        let user: KakaoUser = send(request, OAuth2Provider::Kakao.as_str()).await?;

        Ok(OAuthIdentity {
            oauth_id: user.id.to_string(),
            email: user
                .kakao_account
                .and_then(|account| account.email)
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    async fn fetch_identity(
        &self,
        provider: OAuth2Provider,
        token: &str,
    ) -> AppResult<OAuthIdentity> {
        match provider {
            OAuth2Provider::Google => self.google_identity(token).await,
            OAuth2Provider::Kakao => self.kakao_identity(token).await,
        }
    }

    async fn fetch_instagram_account(&self, token: &str) -> AppResult<InstagramAccount> {
        let request = self
            .client
            .get(INSTAGRAM_USER_INFO_URL)
            .query(&[("fields", "id,username"), ("access_token", token)]);
        let user: InstagramUser = send(request, "INSTAGRAM").await?;

        Ok(InstagramAccount {
            oauth_id: user.id,
            user_name: user.username,
        })
    }
}

/// Send a provider request and decode its JSON body
async fn send<T: DeserializeOwned>(request: RequestBuilder, provider: &str) -> AppResult<T> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(provider, error = %e, "OAuth provider request failed");
        unavailable(provider)
    })?;

    let status = response.status();
    if status.is_client_error() {
        tracing::debug!(provider, %status, "OAuth provider rejected token");
        return Err(invalid_oauth(format!("{} rejected the token", provider)));
    }
    if !status.is_success() {
        tracing::warn!(provider, %status, "OAuth provider returned an error");
        return Err(unavailable(provider));
    }

    response.json::<T>().await.map_err(|e| {
        tracing::warn!(provider, error = %e, "OAuth provider response could not be parsed");
        unavailable(provider)
    })
}

fn invalid_oauth(msg: impl Into<String>) -> AppError {
    AppError::unauthorized(ErrorCode::InvalidOauth, msg)
}

fn unavailable(provider: &str) -> AppError {
    AppError::service_unavailable(
        ErrorCode::OauthProviderUnavailable,
        format!("{} is unavailable", provider),
    )
}
