//! Center handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{PathParam, QueryParams, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Charge, CenterPreview, CenterResponse, NewCenter, OperatingTime};
use crate::errors::AppResult;
use crate::types::{Created, Paginated, PaginationParams};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CenterCreateRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    #[schema(example = "Claon Climbing Gym")]
    pub name: String,
    #[validate(length(min = 1, message = "address is required"))]
    #[schema(example = "123 Wausan-ro, Mapo-gu, Seoul")]
    pub address: String,
    #[schema(example = "02-123-4567")]
    pub tel: Option<String>,
    #[validate(url(message = "web_url must be a URL"))]
    pub web_url: Option<String>,
    #[validate(url(message = "instagram_url must be a URL"))]
    pub instagram_url: Option<String>,
    #[validate(url(message = "youtube_url must be a URL"))]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub img_list: Vec<String>,
    #[serde(default)]
    pub operating_time: Vec<OperatingTime>,
    pub facilities: Option<String>,
    #[serde(default)]
    pub charge: Vec<Charge>,
    pub hold_info_img: Option<String>,
}

impl From<CenterCreateRequest> for NewCenter {
    fn from(request: CenterCreateRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            tel: request.tel,
            web_url: request.web_url,
            instagram_url: request.instagram_url,
            youtube_url: request.youtube_url,
            img_list: request.img_list,
            operating_time: request.operating_time,
            facilities: request.facilities,
            charge: request.charge,
            hold_info_img: request.hold_info_img,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CenterSearchQuery {
    /// Case-insensitive part of the center name
    #[param(example = "claon")]
    pub keyword: String,
}

pub fn center_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_center).get(search_center))
        .route("/:center_id", get(find_center))
}

/// Register a center (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/centers",
    tag = "Centers",
    request_body = CenterCreateRequest,
    responses(
        (status = 201, description = "Center registered", body = CenterResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_center(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CenterCreateRequest>,
) -> AppResult<Created<CenterResponse>> {
    require_admin(&current_user)?;

    let center = state.center_service.create(payload.into()).await?;
    Ok(Created(center))
}

/// Center detail with review count and average rank
#[utoipa::path(
    get,
    path = "/api/v1/centers/{center_id}",
    tag = "Centers",
    params(("center_id" = Uuid, Path, description = "Center ID")),
    responses(
        (status = 200, description = "Center found", body = CenterResponse),
        (status = 404, description = "Center not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_center(
    State(state): State<AppState>,
    PathParam(center_id): PathParam<Uuid>,
) -> AppResult<Json<CenterResponse>> {
    let center = state.center_service.find_center(center_id).await?;
    Ok(Json(center))
}

/// Search centers by name
#[utoipa::path(
    get,
    path = "/api/v1/centers",
    tag = "Centers",
    params(CenterSearchQuery, PaginationParams),
    responses(
        (status = 200, description = "Page of matching centers", body = crate::types::PaginatedCenters)
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_center(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CenterSearchQuery>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<CenterPreview>>> {
    let page = state.center_service.search(&query.keyword, params).await?;
    Ok(Json(page))
}
