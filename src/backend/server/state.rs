//! Application State
//!
//! Central state container for the Axum server. `FromRef` implementations
//! let handlers extract just the piece they need instead of the whole
//! `AppState`.
//!
//! Each HTTP request and each push delivery executes independently; the only
//! shared mutable structure is the connection registry, which guards its map
//! with its own mutex. Messages are independent rows keyed by their own ID,
//! so concurrent sends never contend.

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::error::ApiError;
use crate::backend::media::MediaStore;
use crate::backend::realtime::ConnectionRegistry;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` when `DATABASE_URL` is not set; handlers fail with a generic
    /// server error rather than the server refusing to start.
    pub db_pool: Option<PgPool>,

    /// Live push connections, one per user at most
    pub registry: ConnectionRegistry,

    /// External media host client
    ///
    /// `None` when no upload URL is configured; sends carrying an image then
    /// fail.
    pub media: Option<MediaStore>,
}

impl AppState {
    /// The database pool, or a generic server error when unconfigured
    pub fn require_db(&self) -> Result<&PgPool, ApiError> {
        self.db_pool
            .as_ref()
            .ok_or_else(|| ApiError::internal("database not configured"))
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for Option<MediaStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}
