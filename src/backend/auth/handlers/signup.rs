//! Signup Handler
//!
//! User registration for POST /api/auth/signup.
//!
//! 1. Validate username, email format, and password length
//! 2. Reject duplicate username or email
//! 3. Hash the password with bcrypt
//! 4. Create the user and return a JWT token

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::ApiError;

/// Validate username format
///
/// Usernames must be 3-30 characters, start with a letter, and contain only
/// alphanumeric characters and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::internal("database not configured"))?;
    tracing::info!("Signup request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::validation("Invalid email format"));
    }

    if request.password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        return Err(ApiError::validation("Username already taken"));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        return Err(ApiError::validation("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("failed to hash password: {}", e)))?;

    let user = create_user(&pool, request.username, request.email, password_hash).await?;

    let token = create_token(user.id, user.username.clone())
        .map_err(|e| ApiError::internal(format!("failed to create token: {}", e)))?;

    tracing::info!("User created: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_99"));
        assert!(is_valid_username("Xyz"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("9lives"));
        assert!(!is_valid_username("_underscore"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"x".repeat(31)));
    }

    #[tokio::test]
    async fn test_signup_no_database() {
        let request = SignupRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
        };

        let result = signup(State(None), Json(request)).await;
        assert!(result.is_err());
    }
}
