//! Server Initialization
//!
//! Builds the Axum application: loads optional services, assembles the app
//! state, and configures the router. The server is resilient to missing
//! services; a missing database or media host is logged and the affected
//! endpoints fail at request time instead.

use axum::Router;

use crate::backend::media::MediaStore;
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing ripple backend server");

    let db_pool = load_database().await;
    let media = MediaStore::from_env();
    let registry = ConnectionRegistry::new();

    let app_state = AppState {
        db_pool,
        registry,
        media,
    };

    create_router(app_state)
}
