//! Types shared between the backend server and the desktop client.
//!
//! Everything here crosses the wire as JSON with camelCase field names, so
//! both sides serialize from the same definitions and cannot drift apart.

pub mod error;
pub mod event;
pub mod message;
pub mod user;

pub use error::SharedError;
pub use event::ChatEvent;
pub use message::{DeleteMessageResponse, Message, SendMessagePayload};
pub use user::UserProfile;
