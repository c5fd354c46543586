//! User domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Identity providers accepted at sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OAuth2Provider {
    Google,
    Kakao,
}

impl OAuth2Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuth2Provider::Google => "GOOGLE",
            OAuth2Provider::Kakao => "KAKAO",
        }
    }
}

impl fmt::Display for OAuth2Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so both `/sign-in/google` and `/sign-in/GOOGLE` resolve.
impl FromStr for OAuth2Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("google") {
            Ok(OAuth2Provider::Google)
        } else if s.eq_ignore_ascii_case("kakao") {
            Ok(OAuth2Provider::Kakao)
        } else {
            Err(AppError::validation(format!("Unsupported OAuth2 provider: {}", s)))
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub oauth_id: String,
    pub provider: OAuth2Provider,
    pub role: UserRole,
    /// `None` until sign-up has been completed
    pub nickname: Option<String>,
    pub metropolitan_activity_area: Option<String>,
    pub basic_local_activity_area: Option<String>,
    pub image_path: Option<String>,
    pub instagram_oauth_id: Option<String>,
    pub instagram_user_name: Option<String>,
    pub height: Option<f32>,
    pub arm_reach: Option<f32>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly signed-in user whose profile is still empty
    pub fn new(id: Uuid, email: String, oauth_id: String, provider: OAuth2Provider) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            oauth_id,
            provider,
            role: UserRole::User,
            nickname: None,
            metropolitan_activity_area: None,
            basic_local_activity_area: None,
            image_path: None,
            instagram_oauth_id: None,
            instagram_user_name: None,
            height: None,
            arm_reach: None,
            is_private: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed_sign_up(&self) -> bool {
        self.nickname.is_some()
    }
}

/// Identity returned by an OAuth provider for a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthIdentity {
    pub oauth_id: String,
    pub email: String,
}

/// Profile fields set at sign-up and on profile update
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub nickname: String,
    pub metropolitan_activity_area: String,
    pub basic_local_activity_area: String,
    pub image_path: Option<String>,
    pub instagram_oauth_id: Option<String>,
    pub instagram_user_name: Option<String>,
    pub height: Option<f32>,
    pub arm_reach: Option<f32>,
    /// Left unchanged when `None`
    pub is_private: Option<bool>,
}

/// User response (safe to return to the account owner)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "climber@example.com")]
    pub email: String,
    pub provider: OAuth2Provider,
    #[schema(example = "boulder_kim")]
    pub nickname: Option<String>,
    #[schema(example = "Seoul")]
    pub metropolitan_activity_area: Option<String>,
    #[schema(example = "Mapo-gu")]
    pub basic_local_activity_area: Option<String>,
    pub image_path: Option<String>,
    pub instagram_user_name: Option<String>,
    #[schema(example = 172.5)]
    pub height: Option<f32>,
    #[schema(example = 178.0)]
    pub arm_reach: Option<f32>,
    pub is_private: bool,
    pub is_completed_sign_up: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let is_completed_sign_up = user.is_completed_sign_up();
        Self {
            id: user.id,
            email: user.email,
            provider: user.provider,
            nickname: user.nickname,
            metropolitan_activity_area: user.metropolitan_activity_area,
            basic_local_activity_area: user.basic_local_activity_area,
            image_path: user.image_path,
            instagram_user_name: user.instagram_user_name,
            height: user.height,
            arm_reach: user.arm_reach,
            is_private: user.is_private,
            is_completed_sign_up,
            created_at: user.created_at,
        }
    }
}

/// Another user's profile as seen by the requester
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfileResponse {
    #[schema(example = "boulder_kim")]
    pub nickname: String,
    pub image_path: Option<String>,
    pub metropolitan_activity_area: Option<String>,
    pub basic_local_activity_area: Option<String>,
    pub height: Option<f32>,
    pub arm_reach: Option<f32>,
    pub instagram_user_name: Option<String>,
    pub is_private: bool,
    /// Whether the requester has this user as a laon
    pub is_laon: bool,
}

impl UserProfileResponse {
    pub fn new(user: User, is_laon: bool) -> Self {
        Self {
            nickname: user.nickname.unwrap_or_default(),
            image_path: user.image_path,
            metropolitan_activity_area: user.metropolitan_activity_area,
            basic_local_activity_area: user.basic_local_activity_area,
            height: user.height,
            arm_reach: user.arm_reach,
            instagram_user_name: user.instagram_user_name,
            is_private: user.is_private,
            is_laon,
        }
    }
}

/// Nickname availability check result
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DuplicatedCheckResponse {
    /// `true` when the nickname is already taken
    pub result: bool,
}

/// Instagram account resolved from an Instagram access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InstagramAccount {
    pub oauth_id: String,
    pub user_name: String,
}
