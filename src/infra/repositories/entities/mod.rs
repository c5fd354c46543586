//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod block_user;
pub mod center;
pub mod center_review;
pub mod laon;
pub mod user;
