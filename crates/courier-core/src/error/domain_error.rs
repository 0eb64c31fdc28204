//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::ids::{MessageId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // Not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    // Validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Message body must not be empty")]
    EmptyMessageBody,

    // Conflict
    #[error("Username already in use")]
    UsernameAlreadyExists,

    // Infrastructure (wrapped)
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get a stable error code for API responses
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::MessageNotFound(_) => "MESSAGE_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::EmptyMessageBody => "EMPTY_MESSAGE_BODY",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a not-found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::MessageNotFound(_))
    }

    /// Check if this is a validation error
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidUsername(_) | Self::EmptyMessageBody
        )
    }

    /// Check if this is a conflict error
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameAlreadyExists)
    }
}
