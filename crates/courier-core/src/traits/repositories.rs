//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{DirectMessage, User};
use crate::error::DomainError;
use crate::ids::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// List all users (the contact list)
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a direct message
    async fn create(&self, message: &DirectMessage) -> RepoResult<()>;

    /// Fetch the full conversation between two users, oldest first
    async fn find_conversation(&self, a: UserId, b: UserId) -> RepoResult<Vec<DirectMessage>>;
}
