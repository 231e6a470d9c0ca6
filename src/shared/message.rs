//! Message Types
//!
//! The message record plus the request/response bodies for the send and
//! delete endpoints. A message is created on send, stored immutably, and
//! destroyed on explicit delete by a participant; there is no edit.
//!
//! A conversation is never stored: it is the set of messages whose
//! `{sender_id, receiver_id}` equals the two participants, computed at read
//! time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single chat message between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID (server-assigned)
    pub id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// User who receives the message
    pub receiver_id: Uuid,
    /// Message text, if any
    pub text: Option<String>,
    /// Resolved image URL, if any
    pub image: Option<String>,
    /// Creation timestamp (the explicit sort key for conversations)
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether `user_id` is the sender or the receiver
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The participant that is not `user_id`
    ///
    /// Used when fanning out push events: they go only to the participant
    /// who is not the acting client.
    pub fn other_participant(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

/// Body of `POST /api/messages/send/{peerId}`
///
/// At least one of `text` (non-blank) or `image` must be present; the server
/// rejects an empty payload with a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessagePayload {
    /// Message text
    pub text: Option<String>,
    /// Inline image payload (data URI); replaced with a hosted URL before
    /// persistence
    pub image: Option<String>,
}

impl SendMessagePayload {
    /// True when there is neither non-blank text nor an image
    pub fn is_empty(&self) -> bool {
        let has_text = self
            .text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        !has_text && self.image.is_none()
    }
}

/// Body of a successful `DELETE /api/messages/delete/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageResponse {
    /// Human-readable confirmation
    pub message: String,
    /// The record that was removed
    pub deleted_message: Message,
}
