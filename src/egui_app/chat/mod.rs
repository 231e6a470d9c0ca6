//! Conversation state and the push-channel client
//!
//! - **`store`** - Chat state store, the single source of truth for the open
//!   conversation
//! - **`bridge`** - Background SSE reader forwarding pushed events to the
//!   store

pub mod bridge;
pub mod store;

pub use bridge::RealtimeBridge;
pub use store::ChatStore;
