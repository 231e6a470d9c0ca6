//! Backend Error Handling
//!
//! Defines the error type used by HTTP handlers and its conversion to HTTP
//! responses.

pub mod types;

pub use types::{ApiError, ErrorBody};
