//! Relay state
//!
//! Application state for the relay server.

use crate::connection::ConnectionManager;
use crate::handlers::EventDispatcher;
use courier_common::AppConfig;
use std::sync::Arc;

/// Relay application state
///
/// Holds all shared dependencies for the relay server.
#[derive(Clone)]
pub struct RelayState {
    /// Connection manager and presence registry
    connection_manager: Arc<ConnectionManager>,
    /// Frame dispatcher
    dispatcher: Arc<EventDispatcher>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl RelayState {
    /// Create a new relay state
    #[must_use]
    pub fn new(connection_manager: Arc<ConnectionManager>, config: AppConfig) -> Self {
        let dispatcher = Arc::new(EventDispatcher::new(Arc::clone(&connection_manager)));
        Self {
            connection_manager,
            dispatcher,
            config: Arc::new(config),
        }
    }

    /// Get the connection manager
    #[must_use]
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the frame dispatcher
    #[must_use]
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Get the application configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayState")
            .field("connection_manager", &self.connection_manager)
            .field("config", &"AppConfig")
            .finish()
    }
}
