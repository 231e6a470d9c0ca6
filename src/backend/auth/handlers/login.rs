//! Login Handler
//!
//! User login for POST /api/auth/login. Verifies the bcrypt password hash
//! and returns a fresh JWT token. Unknown email and wrong password produce
//! the same response so the endpoint does not reveal which accounts exist.

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;

/// Login handler
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::internal("database not configured"))?;
    tracing::info!("Login request for email: {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("failed to verify password: {}", e)))?;

    if !valid {
        tracing::warn!("Failed login attempt for user: {}", user.username);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_token(user.id, user.username.clone())
        .map_err(|e| ApiError::internal(format!("failed to create token: {}", e)))?;

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}
