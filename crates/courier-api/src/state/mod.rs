//! Application state
//!
//! Holds the shared dependencies for the Axum application: the
//! repositories, authentication services, and configuration.

use std::sync::Arc;

use courier_common::{AppConfig, JwtService, PasswordService};
use courier_core::{MessageRepository, UserRepository};
use courier_db::PgPool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        jwt_service: Arc<JwtService>,
        config: AppConfig,
    ) -> Self {
        Self {
            pool,
            user_repo,
            message_repo,
            jwt_service,
            password_service: PasswordService::new(),
            config: Arc::new(config),
        }
    }

    /// Get the database pool (used by readiness checks)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"AppConfig")
            .finish()
    }
}
