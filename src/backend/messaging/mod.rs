//! Message Service
//!
//! CRUD over the message collection plus the push fan-out trigger. Handlers
//! live in `handlers`, database operations in `db`.

pub mod db;
pub mod handlers;
