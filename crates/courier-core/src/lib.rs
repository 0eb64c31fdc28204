//! # courier-core
//!
//! Domain layer containing ids, entities, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod ids;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{DirectMessage, User};
pub use error::DomainError;
pub use ids::{MessageId, UserId};
pub use traits::{MessageRepository, RepoResult, UserRepository};
