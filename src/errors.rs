//! Centralized error handling.
//!
//! Every failure in the application ends up as an [`AppError`]. The
//! `IntoResponse` impl is the single place where errors are translated into
//! HTTP statuses and the uniform error body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{sqlx, DbErr, RuntimeErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Machine-readable error codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 400
    InvalidParameter,
    RowAlreadyExist,
    RowDoesNotExist,
    AlreadySignedUp,

    // 401
    NotSignIn,
    InvalidJwt,
    InvalidOauth,
    NotSignedUp,
    NotAccessible,
    Blocked,

    // 404 (UserDoesNotExist is also used with 401 for stale tokens)
    UserDoesNotExist,
    CenterDoesNotExist,
    ReviewDoesNotExist,

    // 429
    TooManyRequests,

    // 503
    OauthProviderUnavailable,

    // 500
    InternalServerError,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{1}")]
    BadRequest(ErrorCode, String),

    /// Request body, query or path failed to parse or validate
    #[error("{0}")]
    Validation(String),

    #[error("{1}")]
    Unauthorized(ErrorCode, String),

    /// Authenticated but lacking the required role
    #[error("Access denied")]
    Forbidden,

    #[error("{1}")]
    NotFound(ErrorCode, String),

    #[error("{0}")]
    Conflict(String),

    #[error("{1}")]
    ServiceUnavailable(ErrorCode, String),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(code, _)
            | AppError::Unauthorized(code, _)
            | AppError::NotFound(code, _)
            | AppError::ServiceUnavailable(code, _) => *code,
            AppError::Validation(_) => ErrorCode::InvalidParameter,
            AppError::Forbidden => ErrorCode::NotAccessible,
            AppError::Conflict(_) => ErrorCode::RowAlreadyExist,
            AppError::Jwt(_) => ErrorCode::InvalidJwt,
            AppError::Database(e) if unique_violation(e).is_some() => ErrorCode::RowAlreadyExist,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                ErrorCode::InternalServerError
            }
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(..) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(..) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(..) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(e) if unique_violation(e).is_some() => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Conflict(msg) => format!("Violate unique constraint - {}", msg),
            AppError::Database(e) => match unique_violation(e) {
                Some(detail) => format!("Violate unique constraint - {}", detail),
                None => "A database error occurred".to_string(),
            },
            AppError::Jwt(_) => "Invalid or expired token".to_string(),
            AppError::Cache(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Extract the driver message when the error is a unique-constraint violation.
fn unique_violation(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
            if e.is_unique_violation() =>
        {
            Some(e.message().to_string())
        }
        _ => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
            _ => None,
        },
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(?code, error = ?self, "Request failed");
        } else {
            tracing::warn!(?code, "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                status: status.as_u16(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, code: ErrorCode, message: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, code: ErrorCode, message: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(code, message))
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(code: ErrorCode, msg: impl Into<String>) -> Self {
        AppError::BadRequest(code, msg.into())
    }

    pub fn unauthorized(code: ErrorCode, msg: impl Into<String>) -> Self {
        AppError::Unauthorized(code, msg.into())
    }

    pub fn not_found(code: ErrorCode, msg: impl Into<String>) -> Self {
        AppError::NotFound(code, msg.into())
    }

    pub fn service_unavailable(code: ErrorCode, msg: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(code, msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request(ErrorCode::RowAlreadyExist, "x"), StatusCode::BAD_REQUEST),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::unauthorized(ErrorCode::NotAccessible, "x"), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::not_found(ErrorCode::CenterDoesNotExist, "x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (
                AppError::service_unavailable(ErrorCode::OauthProviderUnavailable, "x"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_validation_uses_invalid_parameter_code() {
        assert_eq!(AppError::validation("bad").code(), ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_plain_database_error_is_internal() {
        let error = AppError::from(DbErr::Custom("boom".to_string()));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), ErrorCode::InternalServerError);
        assert_eq!(error.user_message(), "A database error occurred");
    }

    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_nickname_key\"")
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_nickname_key\""
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some("23505".into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let db_err = DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(Box::new(
            DuplicateKey,
        ))));
        let error = AppError::from(db_err);

        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.code(), ErrorCode::RowAlreadyExist);
        assert_eq!(
            error.user_message(),
            "Violate unique constraint - duplicate key value violates unique constraint \"users_nickname_key\""
        );
    }

    #[test]
    fn test_internal_message_hidden() {
        let error = AppError::internal("connection string leaked");
        assert_eq!(error.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_conflict_message_prefixed() {
        let error = AppError::conflict("users.nickname");
        assert_eq!(error.user_message(), "Violate unique constraint - users.nickname");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::RowAlreadyExist).unwrap();
        assert_eq!(json, "\"ROW_ALREADY_EXIST\"");
        let json = serde_json::to_string(&ErrorCode::OauthProviderUnavailable).unwrap();
        assert_eq!(json, "\"OAUTH_PROVIDER_UNAVAILABLE\"");
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        let err = missing
            .ok_or_not_found(ErrorCode::ReviewDoesNotExist, "Review not found")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ErrorCode::ReviewDoesNotExist, _)));
    }
}
