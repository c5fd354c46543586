//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod block_user_repository;
pub(crate) mod entities;
mod center_repository;
mod laon_repository;
mod review_repository;
mod user_repository;

pub use block_user_repository::{BlockUserRepository, BlockUserStore};
pub use center_repository::{CenterRepository, CenterStore};
pub use laon_repository::{LaonRepository, LaonStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use block_user_repository::MockBlockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use center_repository::MockCenterRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use laon_repository::MockLaonRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
