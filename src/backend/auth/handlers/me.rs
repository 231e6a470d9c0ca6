//! Current User Handler
//!
//! GET /api/auth/me returns the authenticated user's profile. The auth
//! middleware has already verified the token, so this only needs to look up
//! the user record.

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::UserProfile;

/// Get current user handler
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::internal("database not configured"))?;

    let record = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(Json(record.profile()))
}
