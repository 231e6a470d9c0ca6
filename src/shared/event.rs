//! Push Channel Events
//!
//! Events delivered over the per-user SSE stream. Both variants carry the
//! full message record and are directed only to the participant who is not
//! the acting client. Delivery is best-effort, at-most-once: a disconnected
//! receiver simply misses the event and catches up on its next fetch.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// A real-time event pushed to a connected client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "message", rename_all = "camelCase")]
pub enum ChatEvent {
    /// A new message was sent to the recipient
    NewMessage(Message),
    /// A message visible to the recipient was deleted
    DeleteMessage(Message),
}

impl ChatEvent {
    /// SSE event name for this variant
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMessage(_) => "newMessage",
            Self::DeleteMessage(_) => "deleteMessage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn message() -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            text: Some("hello".to_string()),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ChatEvent::NewMessage(message()).name(), "newMessage");
        assert_eq!(ChatEvent::DeleteMessage(message()).name(), "deleteMessage");
    }

    #[test]
    fn test_tagged_wire_format() {
        let msg = message();
        let event = ChatEvent::NewMessage(msg.clone());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], serde_json::json!("newMessage"));
        assert_eq!(
            json["message"]["id"],
            serde_json::json!(msg.id.to_string())
        );
    }

    #[test]
    fn test_round_trip() {
        let event = ChatEvent::DeleteMessage(message());
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
