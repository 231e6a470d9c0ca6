//! Real-time Push Channel
//!
//! Server side of the push channel: a registry of live per-user connections
//! and the SSE endpoint that clients subscribe through. Delivery is
//! fire-and-forget, at-most-once; a disconnected receiver silently misses
//! events and catches up on its next explicit fetch.

pub mod registry;
pub mod subscription;

pub use registry::ConnectionRegistry;
