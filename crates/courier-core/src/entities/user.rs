//! User entity - represents a registered chat user

use chrono::{DateTime, Utc};

use crate::ids::UserId;

/// A registered user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: UserId, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update the avatar URL
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}
