//! Top-Level Application State
//!
//! Owns the config, the API client, the auth state, and the chat store, and
//! wires them together. Views mutate this struct directly; all async results
//! are drained by `poll` once per frame.
//!
//! The store lives here, on the app instance, and is handed to views by
//! reference. There is no process-global store.

use uuid::Uuid;

use crate::shared::SendMessagePayload;

use super::api::ChatApiClient;
use super::auth::AuthState;
use super::chat::ChatStore;
use super::config::Config;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Auth,
    Chat,
}

/// Everything the desktop client tracks between frames
pub struct AppState {
    pub config: Config,
    pub api: ChatApiClient,
    pub auth: AuthState,
    pub store: ChatStore,
    pub current_view: AppView,

    // Form inputs
    pub is_signup_mode: bool,
    pub username_input: String,
    pub email_input: String,
    pub password_input: String,
    pub message_input: String,

    /// Transient notification from the store, shown until dismissed
    pub notification: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        let config = Config::new();
        let api = ChatApiClient::new(config.clone());
        let store = ChatStore::new(api.clone());
        Self {
            config,
            api,
            auth: AuthState::new(),
            store,
            current_view: AppView::Auth,
            is_signup_mode: false,
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            message_input: String::new(),
            notification: None,
        }
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.auth.error = None;
    }

    pub fn handle_login(&mut self) {
        self.auth.login(
            &self.api,
            self.email_input.trim().to_string(),
            self.password_input.clone(),
        );
    }

    pub fn handle_signup(&mut self) {
        self.auth.signup(
            &self.api,
            self.username_input.trim().to_string(),
            self.email_input.trim().to_string(),
            self.password_input.clone(),
        );
    }

    /// Select a conversation: fetch its history and (re)open the push channel
    pub fn select_peer(&mut self, peer_id: Uuid) {
        self.store.select_peer(peer_id);
        self.store.fetch_messages(peer_id);
    }

    /// Send whatever is in the input bar to the selected peer
    pub fn send_current_input(&mut self) {
        let text = self.message_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.store.send(SendMessagePayload {
            text: Some(text),
            image: None,
        });
        self.message_input.clear();
    }

    /// Drain all pending work; call once per frame
    pub fn poll(&mut self) {
        // A finished login hands back the token; install it everywhere and
        // bring up the chat screen.
        if let Some(token) = self.auth.poll() {
            self.config.set_token(Some(token));
            self.api.set_config(self.config.clone());
            self.store.set_api(self.api.clone());
            self.current_view = AppView::Chat;
            self.password_input.clear();

            self.store.fetch_users();
            self.store.subscribe();
        }

        self.store.poll();

        if let Some(error) = self.store.take_error() {
            self.notification = Some(error);
        }
    }

    pub fn logout(&mut self) {
        self.store.unsubscribe();
        self.config.clear_token();
        self.api.set_config(self.config.clone());
        self.store = ChatStore::new(self.api.clone());
        self.auth.logout();
        self.current_view = AppView::Auth;
        self.message_input.clear();
        self.notification = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
