//! Chat State Store
//!
//! Single source of truth for the open conversation. Owned by the top-level
//! app instance and passed down explicitly; there is no ambient global.
//!
//! The store runs single-threaded on the UI thread. Network work happens on
//! worker threads that report back over channels, and `poll` drains those
//! channels once per frame, so only one mutation executes at a time and no
//! locking is needed. Handlers are not atomic across a round trip though:
//! every in-flight request is tagged with the peer it was issued for, and a
//! result whose tag no longer matches the current selection is discarded
//! instead of applied. Last selection wins.
//!
//! Sends are not optimistic: nothing is appended until the server's
//! canonical record comes back, so the displayed message always carries the
//! server-assigned ID, timestamp, and resolved image URL. Deletes remove
//! locally only after the server confirms, so failures need no rollback.

use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver};

use uuid::Uuid;

use crate::shared::{ChatEvent, Message, SendMessagePayload, UserProfile};

use super::super::api::ChatApiClient;
use super::bridge::RealtimeBridge;

/// Pending operation result types
pub type UsersResult = Result<Vec<UserProfile>, String>;
pub type MessagesResult = Result<Vec<Message>, String>;
pub type SendResult = Result<Message, String>;
pub type DeleteResult = Result<Uuid, String>;

/// Client-side state for the open conversation
pub struct ChatStore {
    api: ChatApiClient,

    /// All other users, for the sidebar
    pub users: Vec<UserProfile>,
    /// Messages of the selected conversation, insertion order = display order
    pub messages: Vec<Message>,
    /// The currently selected peer
    pub selected_peer_id: Option<Uuid>,
    /// Peers with pushed messages the user has not looked at yet.
    /// Ephemeral session state; not persisted across restarts.
    pub unread_peers: HashSet<Uuid>,

    /// Loading flags
    pub is_users_loading: bool,
    pub is_messages_loading: bool,
    pub is_sending: bool,
    pub is_deleting: bool,

    /// Transient error to surface to the user
    pub ui_error: Option<String>,

    bridge: Option<RealtimeBridge>,
    pending_users: Option<Receiver<UsersResult>>,
    pending_messages: Option<(Uuid, Receiver<MessagesResult>)>,
    pending_send: Option<(Uuid, Receiver<SendResult>)>,
    pending_delete: Option<Receiver<DeleteResult>>,
}

impl ChatStore {
    pub fn new(api: ChatApiClient) -> Self {
        Self {
            api,
            users: Vec::new(),
            messages: Vec::new(),
            selected_peer_id: None,
            unread_peers: HashSet::new(),
            is_users_loading: false,
            is_messages_loading: false,
            is_sending: false,
            is_deleting: false,
            ui_error: None,
            bridge: None,
            pending_users: None,
            pending_messages: None,
            pending_send: None,
            pending_delete: None,
        }
    }

    /// Swap the API client (e.g. after login installs a token)
    pub fn set_api(&mut self, api: ChatApiClient) {
        self.api = api;
    }

    /// Whether a peer has unread pushed messages
    pub fn has_unread(&self, peer_id: Uuid) -> bool {
        self.unread_peers.contains(&peer_id)
    }

    /// Select a peer, clearing its unread marker
    ///
    /// The message sequence is deliberately left untouched; callers fetch
    /// separately so the UI can show a loading skeleton in between.
    pub fn select_peer(&mut self, peer_id: Uuid) {
        self.selected_peer_id = Some(peer_id);
        self.unread_peers.remove(&peer_id);
    }

    /// Fetch the sidebar user list on a worker thread
    pub fn fetch_users(&mut self) {
        let (tx, rx) = channel();
        let api = self.api.clone();
        self.is_users_loading = true;
        self.pending_users = Some(rx);

        std::thread::spawn(move || {
            let _ = tx.send(api.get_users());
        });
    }

    /// Fetch the conversation with `peer_id` on a worker thread
    ///
    /// The request is tagged with the peer it was issued for; the response
    /// is committed only if that peer is still selected when it arrives.
    pub fn fetch_messages(&mut self, peer_id: Uuid) {
        let (tx, rx) = channel();
        let api = self.api.clone();
        self.is_messages_loading = true;
        self.pending_messages = Some((peer_id, rx));

        std::thread::spawn(move || {
            let _ = tx.send(api.get_messages(peer_id));
        });
    }

    /// Send a message to the selected peer
    ///
    /// No optimistic append: the sequence is untouched until the canonical
    /// record comes back.
    pub fn send(&mut self, payload: SendMessagePayload) {
        let Some(peer_id) = self.selected_peer_id else {
            self.ui_error = Some("No conversation selected".to_string());
            return;
        };

        let (tx, rx) = channel();
        let api = self.api.clone();
        self.is_sending = true;
        self.pending_send = Some((peer_id, rx));

        std::thread::spawn(move || {
            let _ = tx.send(api.send_message(peer_id, &payload));
        });
    }

    /// Delete a message by ID
    pub fn delete(&mut self, message_id: Uuid) {
        let (tx, rx) = channel();
        let api = self.api.clone();
        self.is_deleting = true;
        self.pending_delete = Some(rx);

        std::thread::spawn(move || {
            let _ = tx.send(api.delete_message(message_id).map(|_| message_id));
        });
    }

    /// Open the push subscription for the current conversation
    ///
    /// Tears down any previous bridge first so exactly one subscription is
    /// ever live; stacking handlers across switches would mutate state once
    /// per stale subscription.
    pub fn subscribe(&mut self) {
        self.unsubscribe();
        match RealtimeBridge::connect(self.api.config()) {
            Ok(bridge) => self.bridge = Some(bridge),
            Err(e) => {
                tracing::warn!("Failed to open realtime subscription: {}", e);
                self.ui_error = Some(e);
            }
        }
    }

    /// Tear down the push subscription
    pub fn unsubscribe(&mut self) {
        if let Some(bridge) = self.bridge.take() {
            bridge.shutdown();
        }
    }

    /// Drain finished operations and pushed events; call once per frame
    pub fn poll(&mut self) {
        if let Some(rx) = &self.pending_users {
            if let Ok(result) = rx.try_recv() {
                self.pending_users = None;
                self.commit_users(result);
            }
        }

        if let Some((peer_id, rx)) = &self.pending_messages {
            let peer_id = *peer_id;
            if let Ok(result) = rx.try_recv() {
                self.pending_messages = None;
                self.commit_messages(peer_id, result);
            }
        }

        if let Some((peer_id, rx)) = &self.pending_send {
            let peer_id = *peer_id;
            if let Ok(result) = rx.try_recv() {
                self.pending_send = None;
                self.commit_send(peer_id, result);
            }
        }

        if let Some(rx) = &self.pending_delete {
            if let Ok(result) = rx.try_recv() {
                self.pending_delete = None;
                self.commit_delete(result);
            }
        }

        // Apply pushed events after request results so a deletion pushed
        // during a fetch still reconciles the fresh sequence.
        loop {
            let event = match &self.bridge {
                Some(bridge) => bridge.try_recv(),
                None => None,
            };
            match event {
                Some(event) => self.apply_event(event),
                None => break,
            }
        }
    }

    /// Commit a finished user-list fetch
    fn commit_users(&mut self, result: UsersResult) {
        self.is_users_loading = false;
        match result {
            Ok(users) => self.users = users,
            Err(e) => self.ui_error = Some(e),
        }
    }

    /// Commit a finished conversation fetch
    ///
    /// Replaces the sequence wholesale, but only when the tagged peer still
    /// matches the selection; a response for a previously selected peer is
    /// dropped. The loading flag clears on every path.
    fn commit_messages(&mut self, peer_id: Uuid, result: MessagesResult) {
        self.is_messages_loading = false;

        if self.selected_peer_id != Some(peer_id) {
            tracing::debug!("Discarding stale message fetch for peer {}", peer_id);
            return;
        }

        match result {
            Ok(messages) => self.messages = messages,
            Err(e) => self.ui_error = Some(e),
        }
    }

    /// Commit a finished send
    ///
    /// Appends the canonical server record so the displayed message carries
    /// server-assigned fields. A record for a conversation no longer
    /// selected is dropped; on failure the sequence is untouched.
    fn commit_send(&mut self, peer_id: Uuid, result: SendResult) {
        self.is_sending = false;

        match result {
            Ok(message) => {
                if self.selected_peer_id == Some(peer_id) {
                    self.messages.push(message);
                } else {
                    tracing::debug!("Discarding send result for deselected peer {}", peer_id);
                }
            }
            Err(e) => self.ui_error = Some(e),
        }
    }

    /// Commit a finished delete
    ///
    /// On failure nothing was removed locally, so there is no rollback.
    fn commit_delete(&mut self, result: DeleteResult) {
        self.is_deleting = false;

        match result {
            Ok(message_id) => self.messages.retain(|m| m.id != message_id),
            Err(e) => self.ui_error = Some(e),
        }
    }

    /// Apply a pushed event
    ///
    /// A new message from the selected peer appends to the live sequence;
    /// from anyone else it only marks the sender unread. A deletion removes
    /// the ID from the sequence regardless of which conversation is open,
    /// since the deleted message might still be rendered.
    pub fn apply_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::NewMessage(message) => {
                if self.selected_peer_id == Some(message.sender_id) {
                    self.messages.push(message);
                } else {
                    self.unread_peers.insert(message.sender_id);
                }
            }
            ChatEvent::DeleteMessage(message) => {
                self.messages.retain(|m| m.id != message.id);
            }
        }
    }

    /// Take the transient error for display, clearing it
    pub fn take_error(&mut self) -> Option<String> {
        self.ui_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::config::Config;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn store() -> ChatStore {
        ChatStore::new(ChatApiClient::new(Config::with_server_url(
            "http://127.0.0.1:1",
        )))
    }

    fn message_from(sender: Uuid, receiver: Uuid, text: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            text: Some(text.to_string()),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_select_peer_clears_unread_but_keeps_messages() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        store.messages = vec![message_from(peer, me, "old")];
        store.unread_peers.insert(peer);

        store.select_peer(peer);

        assert_eq!(store.selected_peer_id, Some(peer));
        assert!(!store.has_unread(peer));
        // Sequence untouched until an explicit fetch replaces it.
        assert_eq!(store.messages.len(), 1);
    }

    #[test]
    fn test_fetch_commit_replaces_sequence_wholesale() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        store.select_peer(peer);
        store.messages = vec![message_from(peer, me, "stale")];
        store.is_messages_loading = true;

        let fresh = vec![
            message_from(me, peer, "one"),
            message_from(peer, me, "two"),
        ];
        store.commit_messages(peer, Ok(fresh.clone()));

        assert_eq!(store.messages, fresh);
        assert!(!store.is_messages_loading);
    }

    #[test]
    fn test_stale_fetch_after_peer_switch_is_discarded() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer_a = Uuid::new_v4();
        let peer_b = Uuid::new_v4();

        // Fetch issued for A, then the user switches to B before it lands.
        store.select_peer(peer_a);
        store.select_peer(peer_b);
        store.commit_messages(peer_a, Ok(vec![message_from(peer_a, me, "late")]));

        assert!(store.messages.is_empty());

        // B's own response still commits: last selection wins.
        let b_messages = vec![message_from(peer_b, me, "current")];
        store.commit_messages(peer_b, Ok(b_messages.clone()));
        assert_eq!(store.messages, b_messages);
    }

    #[test]
    fn test_fetch_failure_clears_loading_and_surfaces_error() {
        let mut store = store();
        let peer = Uuid::new_v4();
        store.select_peer(peer);
        store.is_messages_loading = true;

        store.commit_messages(peer, Err("Internal server error".to_string()));

        assert!(!store.is_messages_loading);
        assert_eq!(store.take_error().as_deref(), Some("Internal server error"));
        assert!(store.messages.is_empty());
    }

    #[test]
    fn test_send_appends_canonical_record_on_success() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        store.select_peer(peer);
        store.is_sending = true;

        let canonical = message_from(me, peer, "hi");
        store.commit_send(peer, Ok(canonical.clone()));

        assert_eq!(store.messages, vec![canonical]);
        assert!(!store.is_sending);
    }

    #[test]
    fn test_send_failure_leaves_sequence_unchanged() {
        let mut store = store();
        let peer = Uuid::new_v4();
        store.select_peer(peer);
        store.is_sending = true;

        store.commit_send(peer, Err("Message must contain text or an image".to_string()));

        assert!(store.messages.is_empty());
        assert!(!store.is_sending);
        assert!(store.take_error().is_some());
    }

    #[test]
    fn test_send_result_for_deselected_peer_is_discarded() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer_a = Uuid::new_v4();
        let peer_b = Uuid::new_v4();
        store.select_peer(peer_a);
        store.select_peer(peer_b);

        store.commit_send(peer_a, Ok(message_from(me, peer_a, "late")));

        assert!(store.messages.is_empty());
    }

    #[test]
    fn test_delete_removes_by_id_after_confirmation() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        store.select_peer(peer);
        let keep = message_from(peer, me, "keep");
        let gone = message_from(me, peer, "gone");
        store.messages = vec![keep.clone(), gone.clone()];
        store.is_deleting = true;

        store.commit_delete(Ok(gone.id));

        assert_eq!(store.messages, vec![keep]);
        assert!(!store.is_deleting);
    }

    #[test]
    fn test_delete_failure_leaves_state_intact() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        let msg = message_from(me, peer, "still here");
        store.messages = vec![msg.clone()];
        store.is_deleting = true;

        store.commit_delete(Err("Message not found".to_string()));

        assert_eq!(store.messages, vec![msg]);
        assert!(!store.is_deleting);
        assert_eq!(store.take_error().as_deref(), Some("Message not found"));
    }

    #[test]
    fn test_push_from_selected_peer_appends() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        store.select_peer(peer);

        let pushed = message_from(peer, me, "live");
        store.apply_event(ChatEvent::NewMessage(pushed.clone()));

        assert_eq!(store.messages, vec![pushed]);
        assert!(!store.has_unread(peer));
    }

    #[test]
    fn test_push_from_other_peer_marks_unread_only() {
        let mut store = store();
        let me = Uuid::new_v4();
        let selected = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.select_peer(selected);

        store.apply_event(ChatEvent::NewMessage(message_from(other, me, "psst")));

        assert!(store.messages.is_empty());
        assert!(store.has_unread(other));

        // Selecting the peer clears the marker.
        store.select_peer(other);
        assert!(!store.has_unread(other));
    }

    #[test]
    fn test_push_delete_reconciles_regardless_of_selection() {
        let mut store = store();
        let me = Uuid::new_v4();
        let peer = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.select_peer(peer);
        let rendered = message_from(peer, me, "visible");
        store.messages = vec![rendered.clone()];

        // Event arrives while a different conversation is technically the
        // sender's; removal still applies to whatever is rendered.
        store.select_peer(other);
        store.apply_event(ChatEvent::DeleteMessage(rendered));

        assert!(store.messages.is_empty());
    }

    #[test]
    fn test_send_without_selection_surfaces_error() {
        let mut store = store();
        store.send(SendMessagePayload {
            text: Some("hello".to_string()),
            image: None,
        });

        assert!(!store.is_sending);
        assert!(store.take_error().is_some());
    }
}
