//! Climbing center domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Opening hours for one day label (e.g. "Weekdays")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OperatingTime {
    #[schema(example = "Everyday")]
    pub day: String,
    #[schema(example = "10:00")]
    pub start: String,
    #[schema(example = "23:00")]
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChargeElement {
    #[schema(example = "Monthly pass")]
    pub name: String,
    #[schema(example = "150,000")]
    pub fee: String,
}

/// A group of fees, optionally illustrated by a price-board image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Charge {
    pub charge_list: Vec<ChargeElement>,
    pub image: Option<String>,
}

/// Center domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub img_list: Vec<String>,
    pub operating_time: Vec<OperatingTime>,
    pub facilities: Option<String>,
    pub charge: Vec<Charge>,
    pub hold_info_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Center {
    /// First image, used as list thumbnail
    pub fn thumbnail(&self) -> Option<&str> {
        self.img_list.first().map(String::as_str)
    }
}

/// Data needed to register a center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCenter {
    pub name: String,
    pub address: String,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub img_list: Vec<String>,
    pub operating_time: Vec<OperatingTime>,
    pub facilities: Option<String>,
    pub charge: Vec<Charge>,
    pub hold_info_img: Option<String>,
}

/// Aggregate of the reviews written for a center
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RankSummary {
    pub review_count: u64,
    pub rank_avg: Option<f64>,
}

/// Full center detail
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CenterResponse {
    pub id: Uuid,
    #[schema(example = "Claon Climbing Gym")]
    pub name: String,
    #[schema(example = "123 Wausan-ro, Mapo-gu, Seoul")]
    pub address: String,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub img_list: Vec<String>,
    pub operating_time: Vec<OperatingTime>,
    pub facilities: Option<String>,
    pub charge: Vec<Charge>,
    pub hold_info_img: Option<String>,
    pub review_count: u64,
    /// Average review rank, absent until the first review
    #[schema(example = 4.5)]
    pub review_rank_avg: Option<f64>,
}

impl CenterResponse {
    pub fn new(center: Center, summary: RankSummary) -> Self {
        Self {
            id: center.id,
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
            review_count: summary.review_count,
            review_rank_avg: summary.rank_avg,
        }
    }
}

/// Center entry in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CenterPreview {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub thumbnail: Option<String>,
}

impl From<Center> for CenterPreview {
    fn from(center: Center) -> Self {
        let thumbnail = center.thumbnail().map(str::to_string);
        Self {
            id: center.id,
            name: center.name,
            address: center.address,
            thumbnail,
        }
    }
}
