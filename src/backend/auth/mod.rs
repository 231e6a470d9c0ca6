//! Authentication
//!
//! User accounts, password hashing, and JWT session tokens. Handlers live in
//! `handlers`, database operations in `users`, token management in
//! `sessions`.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{get_me, login, signup};
