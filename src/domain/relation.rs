//! User-to-user relations: laons and blocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// `user_id` keeps `laon_id` among their laons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Laon {
    pub id: Uuid,
    pub user_id: Uuid,
    pub laon_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// `user_id` has blocked `blocked_user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blocked_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Nickname and picture of a related user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserPreview {
    #[schema(example = "boulder_kim")]
    pub nickname: String,
    pub image_path: Option<String>,
}
