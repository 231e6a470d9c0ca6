//! Server Setup
//!
//! Application state, configuration loading, and Axum app initialization.

pub mod config;
pub mod init;
pub mod state;

pub use state::AppState;
