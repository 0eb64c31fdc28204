//! # courier-db
//!
//! Database layer implementing the `courier-core` repository traits with
//! PostgreSQL via SQLx: connection pool management, row models with
//! `FromRow` derives, and repository implementations.

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgMessageRepository, PgUserRepository};
