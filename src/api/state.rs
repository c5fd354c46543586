//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, CacheStore, Database, OAuthClient};
use crate::services::{
    AuthService, BlockUserService, CenterReviewService, CenterService, LaonService,
    ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub laon_service: Arc<dyn LaonService>,
    pub block_service: Arc<dyn BlockUserService>,
    pub center_service: Arc<dyn CenterService>,
    pub review_service: Arc<dyn CenterReviewService>,
    /// Rate limiting and health checks
    pub cache: Arc<dyn CacheStore>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production services over the database, Redis and the OAuth
    /// providers.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        oauth: Arc<dyn OAuthClient>,
        config: &Config,
    ) -> Self {
        let container =
            Services::from_connection(database.get_connection(), config, cache.clone(), oauth);

        Self::new(&container, cache, database)
    }

    /// Create application state from any service container.
    pub fn new(
        services: &dyn ServiceContainer,
        cache: Arc<dyn CacheStore>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            laon_service: services.laons(),
            block_service: services.blocks(),
            center_service: services.centers(),
            review_service: services.reviews(),
            cache,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockCacheStore, MockOAuthClient, MockTokenStore};
    use crate::services::MockServiceContainer;
    use sea_orm::DatabaseConnection;

    #[test]
    fn test_state_takes_each_service_from_container() {
        let config = Config::with_secret("a".repeat(32)).unwrap();
        let services = Services::from_connection(
            DatabaseConnection::Disconnected,
            &config,
            Arc::new(MockTokenStore::new()),
            Arc::new(MockOAuthClient::new()),
        );

        let mut container = MockServiceContainer::new();
        let auth = services.auth();
        container.expect_auth().times(1).return_const(auth.clone());
        container.expect_users().times(1).return_const(services.users());
        container.expect_laons().times(1).return_const(services.laons());
        container.expect_blocks().times(1).return_const(services.blocks());
        container.expect_centers().times(1).return_const(services.centers());
        let reviews = services.reviews();
        container.expect_reviews().times(1).return_const(reviews.clone());

        let state = AppState::new(
            &container,
            Arc::new(MockCacheStore::new()),
            Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
        );

        assert!(Arc::ptr_eq(&state.auth_service, &auth));
        assert!(Arc::ptr_eq(&state.review_service, &reviews));
    }
}
