//! Router Configuration
//!
//! Combines the public and protected route tables, adds the CORS layer for
//! the browser-facing surface, and installs the fallback handler.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::server::config::cors_origin;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let origin = cors_origin()
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    public_routes()
        .merge(protected_routes())
        .layer(cors)
        .fallback(|| async { "404 Not Found" })
        .with_state(app_state)
}
