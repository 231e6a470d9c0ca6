//! Live Connection Registry
//!
//! Maps a user ID to at most one live push connection. Registering a user
//! who already has a connection replaces it: the old sender is dropped,
//! which ends the old SSE stream. Delivery never blocks and never retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::ChatEvent;

/// Shared registry of live per-user push connections
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<Uuid, mpsc::UnboundedSender<ChatEvent>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live connection for `user_id`, replacing any existing one
    ///
    /// Returns the receiving end the subscription handler streams from.
    pub fn register(&self, user_id: Uuid) -> mpsc::UnboundedReceiver<ChatEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut connections = self.connections.lock().expect("registry lock poisoned");
        if connections.insert(user_id, tx).is_some() {
            tracing::debug!("Replaced existing live connection for user {}", user_id);
        }
        rx
    }

    /// Remove the connection for `user_id` if it is no longer live
    ///
    /// A stream that ends must not unregister a newer connection that has
    /// already replaced it, so removal only happens when the registered
    /// sender is closed.
    pub fn unregister(&self, user_id: Uuid) {
        let mut connections = self.connections.lock().expect("registry lock poisoned");
        if let Some(tx) = connections.get(&user_id) {
            if tx.is_closed() {
                connections.remove(&user_id);
            }
        }
    }

    /// Best-effort delivery of an event to a user's live connection
    ///
    /// Returns true if the event was handed to a live connection. A failed
    /// send means the receiver is gone; the stale entry is dropped and the
    /// event is lost by design.
    pub fn notify(&self, user_id: Uuid, event: ChatEvent) -> bool {
        let name = event.name();
        let mut connections = self.connections.lock().expect("registry lock poisoned");
        match connections.get(&user_id) {
            Some(tx) => match tx.send(event) {
                Ok(()) => {
                    tracing::debug!("Pushed {} event to user {}", name, user_id);
                    true
                }
                Err(_) => {
                    connections.remove(&user_id);
                    tracing::debug!("Dropped stale connection for user {}", user_id);
                    false
                }
            },
            None => false,
        }
    }

    /// Whether `user_id` currently has a live connection
    pub fn is_connected(&self, user_id: Uuid) -> bool {
        self.connections
            .lock()
            .expect("registry lock poisoned")
            .contains_key(&user_id)
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections
            .lock()
            .expect("registry lock poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Message;
    use chrono::Utc;

    fn event() -> ChatEvent {
        ChatEvent::NewMessage(Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            text: Some("hi".to_string()),
            image: None,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_notify_connected_user() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let mut rx = registry.register(user);

        assert!(registry.notify(user, event()));
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_notify_offline_user_is_noop() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.notify(Uuid::new_v4(), event()));
    }

    #[tokio::test]
    async fn test_notify_dropped_receiver_removes_entry() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let rx = registry.register(user);
        drop(rx);

        assert!(!registry.notify(user, event()));
        assert!(!registry.is_connected(user));
    }

    #[tokio::test]
    async fn test_register_replaces_previous_connection() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();

        let mut first = registry.register(user);
        let mut second = registry.register(user);
        assert_eq!(registry.connection_count(), 1);

        // The first receiver's sender was dropped, so its stream ends.
        assert!(first.recv().await.is_none());

        assert!(registry.notify(user, event()));
        assert!(second.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_keeps_live_replacement() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();

        let old = registry.register(user);
        let _new = registry.register(user);
        drop(old);

        // The old stream ending must not tear down the new connection.
        registry.unregister(user);
        assert!(registry.is_connected(user));
    }
}
