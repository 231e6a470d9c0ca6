//! egui Native Desktop Client
//!
//! Native desktop chat client built with egui/eframe that talks to the Axum
//! backend over REST and receives pushed events over SSE.
//!
//! # Module Structure
//!
//! - **`config`** - Configuration management (server URL, token storage)
//! - **`api`** - Blocking REST client for the backend
//! - **`auth`** - Login/signup state and worker threads
//! - **`chat`** - Chat state store and the realtime event bridge
//! - **`state`** - Top-level application state wiring it all together
//! - **`views`** - egui rendering
//! - **`main`** - Application entry point (binary)

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod state;
pub mod views;

pub use api::ChatApiClient;
pub use auth::AuthState;
pub use chat::{ChatStore, RealtimeBridge};
pub use config::Config;
pub use state::{AppState, AppView};
