//! Client Configuration
//!
//! Server URL and token storage for the desktop client.

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    server_url: String,
    token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let server_url =
            std::env::var("CLIENT_API_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self {
            server_url,
            token: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at a specific server
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token: None,
        }
    }

    /// Set the JWT token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the JWT token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let config = Config::with_server_url("http://example.com:3000");
        assert_eq!(
            config.api_url("/api/messages/users"),
            "http://example.com:3000/api/messages/users"
        );
    }

    #[test]
    fn test_token_lifecycle() {
        let mut config = Config::with_server_url("http://example.com");
        assert!(config.get_token().is_none());

        config.set_token(Some("abc".to_string()));
        assert_eq!(config.get_token().map(String::as_str), Some("abc"));

        config.clear_token();
        assert!(config.get_token().is_none());
    }
}
