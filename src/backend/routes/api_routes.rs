//! API Route Handlers
//!
//! # Routes
//!
//! ## Authentication (public)
//! - `POST /api/auth/signup` - User registration
//! - `POST /api/auth/login` - User login
//!
//! ## Protected (JWT bearer token required)
//! - `GET /api/auth/me` - Current user info
//! - `GET /api/messages/users` - All users except the caller
//! - `GET /api/messages/{peerId}` - Conversation with a peer, oldest first
//! - `POST /api/messages/send/{peerId}` - Send a message
//! - `DELETE /api/messages/delete/{id}` - Delete a message
//! - `GET /api/realtime` - SSE push subscription

use axum::routing::{delete, get, post};
use axum::Router;

use crate::backend::auth::{get_me, login, signup};
use crate::backend::messaging::handlers::{
    delete_message, get_messages, get_users, send_message,
};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::realtime::subscription::handle_realtime_subscription;
use crate::backend::server::state::AppState;

/// Public routes: no token required
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// Protected routes: bearer token verified by the auth middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/messages/users", get(get_users))
        .route("/api/messages/send/{peer_id}", post(send_message))
        .route("/api/messages/delete/{id}", delete(delete_message))
        .route("/api/messages/{peer_id}", get(get_messages))
        .route("/api/realtime", get(handle_realtime_subscription))
        .route_layer(axum::middleware::from_fn(auth_middleware))
}
