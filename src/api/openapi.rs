//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, block_handler, center_handler, laon_handler, review_handler, user_handler,
};
use crate::domain::{
    CenterPreview, CenterResponse, Charge, ChargeElement, DuplicatedCheckResponse,
    InstagramAccount, OAuth2Provider, OperatingTime, ReviewBundleResponse, ReviewFindResponse,
    ReviewResponse, UserPreview, UserProfileResponse, UserResponse, UserRole,
};
use crate::errors::ErrorCode;
use crate::services::JwtResponse;
use crate::types::{MessageResponse, PaginatedCenters, PaginatedReviews, PaginatedUsers};

/// OpenAPI documentation for the Claon API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Claon API",
        version = "0.1.0",
        description = "Community backend for climbing centers: accounts, reviews, laons and blocks",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::nickname_duplicate_check,
        auth_handler::instagram_account,
        auth_handler::sign_in,
        auth_handler::sign_up,
        auth_handler::sign_out,
        auth_handler::reissue,
        // User endpoints
        user_handler::get_me,
        user_handler::update_me,
        user_handler::delete_me,
        user_handler::get_profile,
        laon_handler::create_laon,
        laon_handler::delete_laon,
        laon_handler::find_all_laon,
        block_handler::create_block,
        block_handler::delete_block,
        block_handler::find_block_users,
        // Center endpoints
        center_handler::create_center,
        center_handler::find_center,
        center_handler::search_center,
        review_handler::create_review,
        review_handler::update_review,
        review_handler::delete_review,
        review_handler::find_review,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            OAuth2Provider,
            UserResponse,
            UserProfileResponse,
            UserPreview,
            DuplicatedCheckResponse,
            InstagramAccount,
            OperatingTime,
            ChargeElement,
            Charge,
            CenterResponse,
            CenterPreview,
            ReviewResponse,
            ReviewFindResponse,
            ReviewBundleResponse,
            PaginatedUsers,
            PaginatedCenters,
            PaginatedReviews,
            ErrorCode,
            MessageResponse,
            // Request and token types
            auth_handler::OAuthTokenRequest,
            auth_handler::ReissueRequest,
            user_handler::ProfileRequest,
            center_handler::CenterCreateRequest,
            review_handler::ReviewRequest,
            JwtResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "OAuth sign-in, sign-up and tokens"),
        (name = "Users", description = "Accounts and profiles"),
        (name = "Laon", description = "Following other climbers"),
        (name = "Block", description = "Hiding users from each other"),
        (name = "Centers", description = "Climbing centers"),
        (name = "Reviews", description = "Center reviews")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/v1/auth/sign-in"))
                        .build(),
                ),
            );
        }
    }
}
