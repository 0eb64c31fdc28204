//! Presence registry
//!
//! Maps logical user ids to the session id of their live connection.
//! The registry borrows connection handles (session ids) only; the
//! connections themselves are owned by the connection manager. State is
//! process-local and rebuilt by clients re-binding after a restart.

use courier_core::UserId;
use dashmap::DashMap;

/// Mutable mapping from user id to live connection handle.
///
/// Constructed once at server start and shared by reference with every
/// connection task. Uses `DashMap` so `bind`, `lookup`, and
/// `unbind_by_handle` are individually atomic under concurrent access.
#[derive(Default)]
pub struct PresenceRegistry {
    entries: DashMap<UserId, String>,
}

impl PresenceRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Associate a user with a connection handle.
    ///
    /// Last bind wins: if the user was already bound to another handle
    /// (a reconnect with the stale connection still open), the previous
    /// binding is silently replaced. Handles are not checked for
    /// uniqueness across users; an aliased handle is tolerated and
    /// cleaned up wholesale by `unbind_by_handle`.
    pub fn bind(&self, user_id: UserId, handle: impl Into<String>) {
        let handle = handle.into();
        tracing::debug!(user_id = %user_id, handle = %handle, "Presence bound");
        self.entries.insert(user_id, handle);
    }

    /// Look up the handle currently bound for a user. Pure read.
    #[must_use]
    pub fn lookup(&self, user_id: UserId) -> Option<String> {
        self.entries.get(&user_id).map(|h| h.value().clone())
    }

    /// Remove every entry bound to the given handle.
    ///
    /// Idempotent: unbinding a handle with no entries is a no-op.
    /// Returns the number of entries removed.
    pub fn unbind_by_handle(&self, handle: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, bound| {
            if bound == handle {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            tracing::debug!(handle = %handle, removed = removed, "Presence unbound");
        }

        removed
    }

    /// Check whether a user currently has a live handle
    #[must_use]
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Number of users currently bound
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("online", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();

        assert!(registry.lookup(user).is_none());

        registry.bind(user, "conn-1");
        assert_eq!(registry.lookup(user).as_deref(), Some("conn-1"));
        assert!(registry.is_online(user));
        assert_eq!(registry.online_count(), 1);
    }

    #[test]
    fn test_last_bind_wins() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();

        registry.bind(user, "conn-1");
        registry.bind(user, "conn-2");

        assert_eq!(registry.lookup(user).as_deref(), Some("conn-2"));
        assert_eq!(registry.online_count(), 1);
    }

    #[test]
    fn test_unbind_by_handle() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();

        registry.bind(user, "conn-1");
        assert_eq!(registry.unbind_by_handle("conn-1"), 1);
        assert!(registry.lookup(user).is_none());
        assert!(!registry.is_online(user));
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();

        registry.bind(user, "conn-1");
        assert_eq!(registry.unbind_by_handle("conn-1"), 1);
        assert_eq!(registry.unbind_by_handle("conn-1"), 0);
        assert_eq!(registry.unbind_by_handle("never-bound"), 0);
    }

    #[test]
    fn test_unbind_removes_all_aliased_entries() {
        let registry = PresenceRegistry::new();
        let alice = UserId::new();
        let bob = UserId::new();

        // Two users bound to the same handle (off-contract clients)
        registry.bind(alice, "conn-1");
        registry.bind(bob, "conn-1");

        assert_eq!(registry.unbind_by_handle("conn-1"), 2);
        assert!(registry.lookup(alice).is_none());
        assert!(registry.lookup(bob).is_none());
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_unbind_leaves_other_handles_alone() {
        let registry = PresenceRegistry::new();
        let alice = UserId::new();
        let bob = UserId::new();

        registry.bind(alice, "conn-1");
        registry.bind(bob, "conn-2");

        registry.unbind_by_handle("conn-1");
        assert!(registry.lookup(alice).is_none());
        assert_eq!(registry.lookup(bob).as_deref(), Some("conn-2"));
    }

    #[test]
    fn test_stale_handle_left_by_rebind_is_removed_with_its_connection() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();

        // User reconnects; old connection closes afterwards
        registry.bind(user, "conn-1");
        registry.bind(user, "conn-2");
        assert_eq!(registry.unbind_by_handle("conn-1"), 0);

        // The fresh binding survives the stale connection's cleanup
        assert_eq!(registry.lookup(user).as_deref(), Some("conn-2"));
    }
}
