//! HTTP Routes
//!
//! Route wiring for the Axum server: `api_routes` declares the endpoint
//! table, `router` assembles it with middleware and CORS.

pub mod api_routes;
pub mod router;
