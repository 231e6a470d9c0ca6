//! Auth Request and Response Types

use serde::{Deserialize, Serialize};

use crate::shared::UserProfile;

/// Signup request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful signup/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT bearer token
    pub token: String,
    /// The authenticated user, credentials stripped
    pub user: UserProfile,
}
