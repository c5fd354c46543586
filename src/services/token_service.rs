//! JWT issuing and verification.
//!
//! Access and refresh tokens share the signing key and differ by `typ`, so a
//! refresh token can never be used as an access token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::User;
use crate::errors::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    /// Seconds until the token expires, zero once expired
    pub fn remaining_seconds(&self) -> u64 {
        u64::try_from(self.exp - Utc::now().timestamp()).unwrap_or(0)
    }
}

/// A freshly signed access/refresh pair
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Refresh claims, kept so the caller can register the token
    pub refresh_claims: Claims,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Signs and verifies HS256 tokens
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            access_lifetime: Duration::minutes(config.access_token_minutes),
            refresh_lifetime: Duration::days(config.refresh_token_days),
        }
    }

    /// Issue an access/refresh pair for `user`
    pub fn issue(&self, user: &User) -> AppResult<IssuedTokens> {
        let access_claims = self.claims(user, TokenKind::Access, self.access_lifetime);
        let refresh_claims = self.claims(user, TokenKind::Refresh, self.refresh_lifetime);

        let header = Header::new(Algorithm::HS256);
        let access_token = encode(&header, &access_claims, &self.encoding_key)?;
        let refresh_token = encode(&header, &refresh_claims, &self.encoding_key)?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            refresh_claims,
            expires_in: self.access_lifetime.num_seconds(),
        })
    }

    /// Verify signature and expiry, then require the expected token kind
    pub fn verify(&self, token: &str, kind: TokenKind) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?
            .claims;

        if claims.typ != kind {
            return Err(AppError::unauthorized(
                ErrorCode::InvalidJwt,
                "Unexpected token type",
            ));
        }

        Ok(claims)
    }

    fn claims(&self, user: &User, typ: TokenKind, lifetime: Duration) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user.id,
            role: user.role.to_string(),
            typ,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
