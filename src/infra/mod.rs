//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Redis cache and token store
//! - OAuth provider HTTP client
//! - Unit of Work as the repository hub

pub mod cache;
pub mod db;
pub mod oauth;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, CacheStore, TokenStore};
pub use db::{Database, Migrator};
pub use oauth::{HttpOAuthClient, OAuthClient};
pub use repositories::{
    BlockUserRepository, CenterRepository, LaonRepository, ReviewRepository, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::{MockCacheStore, MockTokenStore};
#[cfg(any(test, feature = "test-utils"))]
pub use oauth::MockOAuthClient;
