//! Claon API - backend of a community platform for climbing centers.
//!
//! Users sign in through Google or Kakao, complete a profile, review
//! centers, keep "laons" (climbers they follow) and block each other.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and DTOs
//! - **services**: Application use cases and business logic
//! - **infra**: Database, Redis and OAuth provider access
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies pending migrations first)
//! cargo run -- serve -p 8080
//!
//! # Inspect or run migrations
//! cargo run -- migrate status
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
