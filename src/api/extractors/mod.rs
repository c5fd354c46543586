//! Request extractors that report failures as `AppError`.

mod validated_json;

use axum::extract::FromRequestParts;

use crate::errors::AppError;

pub use validated_json::ValidatedJson;

/// `axum::extract::Path` with 400 `INVALID_PARAMETER` on bad values
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// `axum::extract::Query` with 400 `INVALID_PARAMETER` on bad values
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
