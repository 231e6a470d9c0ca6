//! Real-time Subscription Handler
//!
//! Implements the SSE subscription endpoint `GET /api/realtime`. Each
//! authenticated client gets a stream of the push events directed at it:
//! `newMessage` and `deleteMessage` frames, with the serialized event as the
//! data payload.
//!
//! Registering with the connection registry replaces any previous live
//! connection for the same user, so a reconnecting client never holds two
//! streams. The stream ends when the registry drops the sender (replacement)
//! or the channel closes.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::middleware::auth::AuthUser;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::ChatEvent;

/// Handle real-time subscription (GET /api/realtime)
///
/// Registers the caller in the connection registry and streams its push
/// events as Server-Sent Events. Keep-alive comments hold the connection
/// open between events.
pub async fn handle_realtime_subscription(
    State(registry): State<ConnectionRegistry>,
    AuthUser(user): AuthUser,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    tracing::info!("Realtime subscription opened for user {}", user.user_id);

    let rx = registry.register(user.user_id);

    let stream = stream::unfold(
        (rx, registry, user.user_id),
        move |(mut rx, registry, user_id): (UnboundedReceiver<ChatEvent>, _, _)| async move {
            loop {
                match rx.recv().await {
                    Some(event) => {
                        let data = match serde_json::to_string(&event) {
                            Ok(data) => data,
                            Err(e) => {
                                tracing::error!("Failed to serialize push event: {:?}", e);
                                continue;
                            }
                        };

                        let sse_event = Event::default().event(event.name()).data(data);
                        return Some((Ok(sse_event), (rx, registry, user_id)));
                    }
                    None => {
                        // Sender dropped: either the connection was replaced
                        // or the server is shutting down.
                        tracing::info!("Realtime subscription closed for user {}", user_id);
                        registry.unregister(user_id);
                        return None;
                    }
                }
            }
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}
