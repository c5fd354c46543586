//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on a single
//! handle. The one multi-statement write (blocking a user) owns its
//! transaction inside the block repository.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    BlockUserRepository, BlockUserStore, CenterRepository, CenterStore, LaonRepository,
    LaonStore, ReviewRepository, ReviewStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn centers(&self) -> Arc<dyn CenterRepository>;

    fn reviews(&self) -> Arc<dyn ReviewRepository>;

    fn laons(&self) -> Arc<dyn LaonRepository>;

    fn block_users(&self) -> Arc<dyn BlockUserRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    center_repo: Arc<CenterStore>,
    review_repo: Arc<ReviewStore>,
    laon_repo: Arc<LaonStore>,
    block_user_repo: Arc<BlockUserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            center_repo: Arc::new(CenterStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db.clone())),
            laon_repo: Arc::new(LaonStore::new(db.clone())),
            block_user_repo: Arc::new(BlockUserStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn centers(&self) -> Arc<dyn CenterRepository> {
        self.center_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }

    fn laons(&self) -> Arc<dyn LaonRepository> {
        self.laon_repo.clone()
    }

    fn block_users(&self) -> Arc<dyn BlockUserRepository> {
        self.block_user_repo.clone()
    }
}
