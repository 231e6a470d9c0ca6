//! Backend Server
//!
//! Axum HTTP server exposing authentication and messaging endpoints backed
//! by PostgreSQL, plus the per-user SSE push channel.

pub mod auth;
pub mod error;
pub mod media;
pub mod messaging;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod server;
