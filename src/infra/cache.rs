//! Redis cache implementation.
//!
//! Holds rate-limit counters, the access-token blacklist and the live
//! refresh tokens. Keys expire with the token they describe.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::config::{
    Config, CACHE_PREFIX_BLACKLIST, CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_REFRESH,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Token bookkeeping needed by sign-out and reissue.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reject the access token `jti` for the next `ttl_seconds`
    async fn blacklist(&self, jti: &str, ttl_seconds: u64) -> AppResult<()>;

    async fn is_blacklisted(&self, jti: &str) -> AppResult<bool>;

    /// Remember a refresh token as redeemable by `user_id`
    async fn save_refresh_token(&self, jti: &str, user_id: Uuid, ttl_seconds: u64)
        -> AppResult<()>;

    /// Remove a refresh token and return its owner; `None` if unknown or expired
    async fn take_refresh_token(&self, jti: &str) -> AppResult<Option<Uuid>>;
}

/// Request-level cache operations used by middleware and health checks.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Count a request against `identifier`; returns (count, allowed)
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)>;

    async fn ping(&self) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::open(config.redis_url.as_str()).map_err(cache_error)?;
        let connection = ConnectionManager::new(client).await.map_err(cache_error)?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value and delete it in the same command.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get_del(key).await.map_err(cache_error)?;
        value.map(|json| decode(&json)).transpose()
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds.max(1))
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }
}

#[async_trait]
impl TokenStore for Cache {
    async fn blacklist(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_BLACKLIST, jti);
        self.set_with_ttl(&key, &true, ttl_seconds).await
    }

    async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        let key = format!("{}{}", CACHE_PREFIX_BLACKLIST, jti);
        self.exists(&key).await
    }

    async fn save_refresh_token(
        &self,
        jti: &str,
        user_id: Uuid,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_REFRESH, jti);
        self.set_with_ttl(&key, &user_id, ttl_seconds).await
    }

    async fn take_refresh_token(&self, jti: &str) -> AppResult<Option<Uuid>> {
        let key = format!("{}{}", CACHE_PREFIX_REFRESH, jti);
        self.take(&key).await
    }
}

#[async_trait]
impl CacheStore for Cache {
    /// Fixed-window counter: the first hit of a window sets its expiry.
    async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: u64 = conn.incr(&key, 1u64).await.map_err(cache_error)?;
        if count == 1 {
            let window = i64::try_from(window_seconds).unwrap_or(i64::MAX);
            let _: () = conn.expire(&key, window).await.map_err(cache_error)?;
        }

        Ok((count, count <= max_requests))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> AppResult<T> {
    serde_json::from_str(json)
        .map_err(|e| AppError::internal(format!("Cache deserialization error: {}", e)))
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::Cache(e)
}
