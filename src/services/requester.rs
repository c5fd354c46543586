//! Lookups of the user behind a request.

use uuid::Uuid;

use crate::domain::User;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infra::UserRepository;

/// The token's user; a token that outlived its account is rejected
pub(crate) async fn find_requester(users: &dyn UserRepository, id: Uuid) -> AppResult<User> {
    users.find_by_id(id).await?.ok_or_else(|| {
        AppError::unauthorized(ErrorCode::UserDoesNotExist, "User does not exist")
    })
}

/// The token's user, who must also have completed sign-up
pub(crate) async fn find_member(users: &dyn UserRepository, id: Uuid) -> AppResult<User> {
    let user = find_requester(users, id).await?;
    if !user.is_completed_sign_up() {
        return Err(AppError::unauthorized(
            ErrorCode::NotSignedUp,
            "Sign-up has not been completed",
        ));
    }
    Ok(user)
}

/// Another user addressed by nickname
pub(crate) async fn find_target(users: &dyn UserRepository, nickname: &str) -> AppResult<User> {
    users.find_by_nickname(nickname).await?.ok_or_else(|| {
        AppError::not_found(
            ErrorCode::UserDoesNotExist,
            format!("User '{}' does not exist", nickname),
        )
    })
}
