//! Service Container - Centralized service access.
//!
//! Wires every service over one shared `Persistence` unit of work and hands
//! them out as trait objects, so handlers and tests only see the traits.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BlockUserManager, BlockUserService, CenterManager,
    CenterReviewManager, CenterReviewService, CenterService, LaonManager, LaonService,
    TokenProvider, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{OAuthClient, Persistence, TokenStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn laons(&self) -> Arc<dyn LaonService>;

    fn blocks(&self) -> Arc<dyn BlockUserService>;

    fn centers(&self) -> Arc<dyn CenterService>;

    fn reviews(&self) -> Arc<dyn CenterReviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    laon_service: Arc<dyn LaonService>,
    block_service: Arc<dyn BlockUserService>,
    center_service: Arc<dyn CenterService>,
    review_service: Arc<dyn CenterReviewService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        laon_service: Arc<dyn LaonService>,
        block_service: Arc<dyn BlockUserService>,
        center_service: Arc<dyn CenterService>,
        review_service: Arc<dyn CenterReviewService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            laon_service,
            block_service,
            center_service,
            review_service,
        }
    }

    /// Build every service on top of a database connection and the shared
    /// token store and OAuth client
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        token_store: Arc<dyn TokenStore>,
        oauth: Arc<dyn OAuthClient>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(
                uow.clone(),
                TokenProvider::new(config),
                token_store.clone(),
                oauth,
            )),
            user_service: Arc::new(UserManager::new(uow.clone(), token_store)),
            laon_service: Arc::new(LaonManager::new(uow.clone())),
            block_service: Arc::new(BlockUserManager::new(uow.clone())),
            center_service: Arc::new(CenterManager::new(uow.clone())),
            review_service: Arc::new(CenterReviewManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn laons(&self) -> Arc<dyn LaonService> {
        self.laon_service.clone()
    }

    fn blocks(&self) -> Arc<dyn BlockUserService> {
        self.block_service.clone()
    }

    fn centers(&self) -> Arc<dyn CenterService> {
        self.center_service.clone()
    }

    fn reviews(&self) -> Arc<dyn CenterReviewService> {
        self.review_service.clone()
    }
}
