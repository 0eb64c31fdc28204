use std::sync::Arc;

use courier_core::UserId;
use dashmap::DashMap;

use crate::presence::PresenceRegistry;

use super::connection::Connection;

/// Owns every live connection and the presence registry.
///
/// The manager is the single place where the connection table and the
/// registry change together, so a session cannot end up registered
/// without a connection entry or vice versa for longer than one call.
#[derive(Default)]
pub struct ConnectionManager {
    connections: DashMap<String, Arc<Connection>>,
    registry: PresenceRegistry,
}

impl ConnectionManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            registry: PresenceRegistry::new(),
        }
    }

    /// Register a freshly accepted connection
    pub fn add_connection(&self, connection: Arc<Connection>) {
        tracing::debug!(session_id = %connection.session_id(), "Connection added");
        self.connections
            .insert(connection.session_id().to_owned(), connection);
    }

    #[must_use]
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|c| Arc::clone(&c))
    }

    /// Bind a session to a user and publish it in the registry.
    ///
    /// Returns false when the session is unknown or already closed, in
    /// which case the registry is left untouched.
    pub async fn bind_user(&self, session_id: &str, user_id: UserId) -> bool {
        let Some(connection) = self.get_connection(session_id) else {
            return false;
        };
        if !connection.bind(user_id).await {
            return false;
        }
        self.registry.bind(user_id, session_id);
        true
    }

    /// Resolve a user to their live connection, if any.
    ///
    /// A registry entry pointing at a session that has already left the
    /// connection table resolves to nothing.
    #[must_use]
    pub fn resolve(&self, user_id: UserId) -> Option<Arc<Connection>> {
        let handle = self.registry.lookup(user_id)?;
        self.get_connection(&handle)
    }

    /// Tear down a session: mark it closed, drop its registry entries,
    /// and remove it from the table. Idempotent.
    pub async fn remove_connection(&self, session_id: &str) {
        if let Some(connection) = self.get_connection(session_id) {
            if connection.close().await {
                tracing::debug!(session_id = %session_id, "Connection removed");
            }
        }
        self.registry.unbind_by_handle(session_id);
        self.connections.remove(session_id);
    }

    #[must_use]
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("registry", &self.registry)
            .finish()
    }
}
