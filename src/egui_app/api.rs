//! Chat API Client
//!
//! Blocking functions for the backend's REST surface. Each call runs on its
//! own small runtime; the store invokes them from worker threads so the UI
//! thread never blocks on the network.
//!
//! Error values carry the server-provided message verbatim so the UI can
//! surface it as a transient notification.

use reqwest::Client;
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::shared::{DeleteMessageResponse, Message, SendMessagePayload, UserProfile};

use super::config::Config;

/// Signup/login response body
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Error body returned by the server
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking HTTP client for the chat API
#[derive(Clone)]
pub struct ChatApiClient {
    config: Config,
    client: Client,
}

impl ChatApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Swap in a new configuration (e.g. after login stores a token)
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn token(&self) -> Result<String, String> {
        self.config
            .get_token()
            .cloned()
            .ok_or_else(|| "Not authenticated".to_string())
    }

    /// Extract the server's error message from a failed response
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed: {}", status),
        }
    }

    /// Register a new account
    pub fn signup(&self, username: &str, email: &str, password: &str) -> Result<AuthResponse, String> {
        let url = self.config.api_url("/api/auth/signup");
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<AuthResponse>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }

    /// Log in with email and password
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, String> {
        let url = self.config.api_url("/api/auth/login");
        let body = serde_json::json!({ "email": email, "password": password });

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<AuthResponse>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }

    /// Get all users except the caller
    pub fn get_users(&self) -> Result<Vec<UserProfile>, String> {
        let url = self.config.api_url("/api/messages/users");
        let token = self.token()?;

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<Vec<UserProfile>>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }

    /// Get the conversation with a peer, oldest first
    pub fn get_messages(&self, peer_id: Uuid) -> Result<Vec<Message>, String> {
        let url = self.config.api_url(&format!("/api/messages/{}", peer_id));
        let token = self.token()?;

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<Vec<Message>>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }

    /// Send a message to a peer, returning the canonical server record
    pub fn send_message(
        &self,
        peer_id: Uuid,
        payload: &SendMessagePayload,
    ) -> Result<Message, String> {
        let url = self
            .config
            .api_url(&format!("/api/messages/send/{}", peer_id));
        let token = self.token()?;

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&token)
                .json(payload)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<Message>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }

    /// Delete a message by ID
    pub fn delete_message(&self, message_id: Uuid) -> Result<DeleteMessageResponse, String> {
        let url = self
            .config
            .api_url(&format!("/api/messages/delete/{}", message_id));
        let token = self.token()?;

        let rt = Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;
        rt.block_on(async {
            let response = self
                .client
                .delete(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| format!("Network error: {}", e))?;

            if !response.status().is_success() {
                return Err(Self::error_message(response).await);
            }

            response
                .json::<DeleteMessageResponse>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_token() {
        let api = ChatApiClient::new(Config::with_server_url("http://127.0.0.1:1"));
        assert_eq!(api.token().unwrap_err(), "Not authenticated");
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Message not found"}"#).unwrap();
        assert_eq!(body.message, "Message not found");
    }
}
