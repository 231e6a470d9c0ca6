//! Messaging HTTP Handlers
//!
//! The four message service operations:
//!
//! - `GET /api/messages/users` - list peers for the sidebar
//! - `GET /api/messages/{peerId}` - list a conversation, oldest first
//! - `POST /api/messages/send/{peerId}` - create a message, push `newMessage`
//! - `DELETE /api/messages/delete/{id}` - delete a message, push `deleteMessage`
//!
//! Push delivery is best-effort: if the other participant has no live
//! connection the event is dropped and they see the change on their next
//! fetch. Both events go only to the participant who is not the acting
//! client.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{ChatEvent, DeleteMessageResponse, Message, SendMessagePayload, UserProfile};

use super::db;

/// List all users except the caller (GET /api/messages/users)
pub async fn get_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let pool = state.require_db()?;

    let users = db::list_peers(pool, user.user_id).await?;
    Ok(Json(users))
}

/// List the conversation with a peer (GET /api/messages/{peerId})
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let pool = state.require_db()?;

    let messages = db::conversation_messages(pool, user.user_id, peer_id).await?;
    Ok(Json(messages))
}

/// Send a message to a peer (POST /api/messages/send/{peerId})
///
/// Rejects payloads with neither non-blank text nor an image. If an image is
/// present it is uploaded to the media host first and stored as a URL. After
/// the message persists, a `newMessage` event is pushed to the receiver's
/// live connection if one exists.
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(peer_id): Path<Uuid>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<Json<Message>, ApiError> {
    let pool = state.require_db()?;

    if payload.is_empty() {
        return Err(ApiError::validation(
            "Message must contain text or an image",
        ));
    }

    let image_url = match payload.image {
        Some(image) => {
            let media = state
                .media
                .as_ref()
                .ok_or_else(|| ApiError::internal("media storage not configured"))?;
            let url = media
                .upload(&image)
                .await
                .map_err(|e| ApiError::internal(format!("image upload failed: {}", e)))?;
            Some(url)
        }
        None => None,
    };

    let text = payload.text.filter(|t| !t.trim().is_empty());
    let message = db::insert_message(pool, user.user_id, peer_id, text, image_url).await?;

    // Best-effort fan-out; a disconnected receiver misses the event.
    state
        .registry
        .notify(peer_id, ChatEvent::NewMessage(message.clone()));

    Ok(Json(message))
}

/// Delete a message (DELETE /api/messages/delete/{id})
///
/// The ID must be a syntactically valid UUID (400 otherwise, via the raw
/// path parameter), the message must exist (404), and the caller must be a
/// participant (403). The delete itself is atomic: if a concurrent request
/// removed the row after the existence check, the result is 404, never an
/// ambiguous error.
pub async fn delete_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteMessageResponse>, ApiError> {
    let pool = state.require_db()?;

    let message_id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::validation("Invalid message ID format"))?;

    let message = db::get_message(pool, message_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    if !message.is_participant(user.user_id) {
        return Err(ApiError::forbidden("Unauthorized to delete this message"));
    }

    let deleted = db::delete_message(pool, message_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    // Notify the participant who did not perform the delete.
    let other = deleted.other_participant(user.user_id);
    state
        .registry
        .notify(other, ChatEvent::DeleteMessage(deleted.clone()));

    Ok(Json(DeleteMessageResponse {
        message: "Message deleted successfully".to_string(),
        deleted_message: deleted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_rejected_shape() {
        // The handler guard mirrors SendMessagePayload::is_empty; pin the
        // contract here so a payload of whitespace cannot slip through.
        let payload = SendMessagePayload {
            text: Some("  \n ".to_string()),
            image: None,
        };
        assert!(payload.is_empty());
    }

    #[test]
    fn test_invalid_message_id_maps_to_validation() {
        let err = Uuid::parse_str("not-a-uuid")
            .map_err(|_| ApiError::validation("Invalid message ID format"))
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
