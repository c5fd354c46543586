//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through a `UnitOfWork`.

mod auth_service;
mod block_service;
mod center_review_service;
mod center_service;
pub mod container;
mod laon_service;
mod requester;
mod token_service;
mod user_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Tokens
pub use token_service::{Claims, TokenKind, TokenProvider};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, JwtResponse};
pub use block_service::{BlockUserManager, BlockUserService};
pub use center_review_service::{CenterReviewManager, CenterReviewService};
pub use center_service::{CenterManager, CenterService};
pub use laon_service::{LaonManager, LaonService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
