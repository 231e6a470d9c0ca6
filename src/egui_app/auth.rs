//! Client Authentication State
//!
//! Tracks the logged-in user and drives login/signup requests on worker
//! threads, with results drained once per frame like the chat store's
//! pending operations.

use std::sync::mpsc::{channel, Receiver};

use crate::shared::UserProfile;

use super::api::{AuthResponse, ChatApiClient};

/// Result of an in-flight login or signup
pub type AuthResult = Result<AuthResponse, String>;

/// Authentication state for the desktop client
#[derive(Default)]
pub struct AuthState {
    /// The authenticated user, once logged in
    pub user: Option<UserProfile>,
    /// Transient error from the last attempt
    pub error: Option<String>,
    /// Whether a login/signup round trip is in flight
    pub is_authenticating: bool,

    pending: Option<Receiver<AuthResult>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Start a login request on a worker thread
    pub fn login(&mut self, api: &ChatApiClient, email: String, password: String) {
        let (tx, rx) = channel();
        let api = api.clone();
        self.is_authenticating = true;
        self.error = None;
        self.pending = Some(rx);

        std::thread::spawn(move || {
            let _ = tx.send(api.login(&email, &password));
        });
    }

    /// Start a signup request on a worker thread
    pub fn signup(
        &mut self,
        api: &ChatApiClient,
        username: String,
        email: String,
        password: String,
    ) {
        let (tx, rx) = channel();
        let api = api.clone();
        self.is_authenticating = true;
        self.error = None;
        self.pending = Some(rx);

        std::thread::spawn(move || {
            let _ = tx.send(api.signup(&username, &email, &password));
        });
    }

    /// Drain a finished auth request, returning the token to install
    ///
    /// Called once per frame. On success the user is recorded here and the
    /// token handed back so the app can store it in the shared config.
    pub fn poll(&mut self) -> Option<String> {
        let result = match &self.pending {
            Some(rx) => rx.try_recv().ok()?,
            None => return None,
        };

        self.pending = None;
        self.is_authenticating = false;

        match result {
            Ok(response) => {
                tracing::info!("Logged in as {}", response.user.username);
                self.user = Some(response.user);
                Some(response.token)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Log out, clearing the user
    pub fn logout(&mut self) {
        self.user = None;
        self.error = None;
        self.is_authenticating = false;
        self.pending = None;
    }
}
