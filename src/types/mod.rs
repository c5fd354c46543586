//! Shared types used across handlers and services.

mod pagination;
mod response;

pub use pagination::{
    Paginated, PaginatedCenters, PaginatedReviews, PaginatedUsers, PaginationParams,
};
pub use response::{Created, MessageResponse};
