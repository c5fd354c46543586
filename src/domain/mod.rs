//! Domain layer - Core business entities and logic
//!
//! Plain types describing users, centers, reviews and the relations
//! between users. Nothing here touches the database or HTTP.

pub mod center;
pub mod relation;
pub mod review;
pub mod user;

pub use center::{
    Center, CenterPreview, CenterResponse, Charge, ChargeElement, NewCenter, OperatingTime,
    RankSummary,
};
pub use relation::{BlockUser, Laon, UserPreview};
pub use review::{
    CenterReview, ReviewBundleResponse, ReviewDetail, ReviewFindResponse, ReviewResponse,
};
pub use user::{
    DuplicatedCheckResponse, InstagramAccount, OAuth2Provider, OAuthIdentity, ProfileInput,
    User, UserProfileResponse, UserResponse, UserRole,
};
