//! HTTP Middleware
//!
//! Request-level middleware for the Axum server. Currently only
//! authentication.

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
