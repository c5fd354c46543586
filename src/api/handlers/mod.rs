//! HTTP request handlers.

pub mod auth_handler;
pub mod block_handler;
pub mod center_handler;
pub mod laon_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::{auth_member_routes, auth_routes};
pub use block_handler::block_routes;
pub use center_handler::center_routes;
pub use laon_handler::laon_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;
