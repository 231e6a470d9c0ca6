//! Ripple - Main Library
//!
//! Ripple is a small real-time chat application: an Axum backend exposing
//! authentication and messaging endpoints backed by PostgreSQL, a per-user
//! Server-Sent Events push channel, and a native egui desktop client.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between frontend and backend: the message
//!   record, user profiles, push event payloads, and common errors.
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature):
//!   Axum routes, auth, the message service, the SSE connection registry,
//!   and media upload.
//! - **`egui_app`** - Native desktop client (egui/eframe): the chat state
//!   store, the realtime event bridge, the HTTP API client, and the views.
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend server modules (axum, tower, bcrypt,
//!   jsonwebtoken). Required for `ripple-server` builds.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// egui native desktop app
pub mod egui_app;
