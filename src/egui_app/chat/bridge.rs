//! Realtime Event Bridge
//!
//! Client side of the push channel. A bridge owns one background thread that
//! holds the SSE connection, parses frames into `ChatEvent`s, and forwards
//! them over a channel the chat store drains once per frame.
//!
//! The store keeps at most one bridge alive and tears the old one down
//! before opening a new one. That teardown is a correctness requirement,
//! not a performance nicety: stacked subscriptions would apply every event
//! N times after N reconnects. The bridge does no buffering; events
//! arriving while no bridge is alive are lost by design, the same as being
//! offline.

use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::shared::ChatEvent;

use super::super::config::Config;

/// Incremental parser for the SSE wire format
///
/// Feed it one line at a time; a completed frame whose data parses as a
/// `ChatEvent` is returned on the blank separator line. Keep-alive comment
/// lines (leading `:`) and unknown fields are ignored.
#[derive(Default)]
pub struct SseFrameParser {
    data: Vec<String>,
}

impl SseFrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of the stream, returning an event on frame end
    pub fn push_line(&mut self, line: &str) -> Option<ChatEvent> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            // Frame boundary: assemble and parse whatever data accumulated.
            if self.data.is_empty() {
                return None;
            }
            let payload = self.data.join("\n");
            self.data.clear();
            match serde_json::from_str::<ChatEvent>(&payload) {
                Ok(event) => return Some(event),
                Err(e) => {
                    tracing::warn!("Ignoring unparseable push event: {}", e);
                    return None;
                }
            }
        }

        if line.starts_with(':') {
            // Keep-alive comment.
            return None;
        }

        if let Some(value) = line.strip_prefix("data:") {
            self.data.push(value.trim_start().to_string());
        }
        // "event:" and "id:" fields are redundant with the tagged payload.

        None
    }
}

/// A live subscription to the push channel
///
/// Dropping the bridge (or calling `shutdown`) signals the background
/// thread to stop; it notices at the next frame or keep-alive.
pub struct RealtimeBridge {
    events: Receiver<ChatEvent>,
    shutdown: Arc<AtomicBool>,
}

impl RealtimeBridge {
    /// Open the SSE stream and start the reader thread
    pub fn connect(config: &Config) -> Result<Self, String> {
        let token = config
            .get_token()
            .cloned()
            .ok_or_else(|| "Not authenticated".to_string())?;
        let url = config.api_url("/api/realtime");

        let (tx, rx) = channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = shutdown.clone();

        std::thread::spawn(move || {
            if let Err(e) = run_stream(&url, &token, tx, thread_shutdown) {
                tracing::warn!("Realtime stream ended: {}", e);
            }
        });

        Ok(Self {
            events: rx,
            shutdown,
        })
    }

    /// Drain any events the reader thread has forwarded
    pub fn try_recv(&self) -> Option<ChatEvent> {
        self.events.try_recv().ok()
    }

    /// Signal the reader thread to stop
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl Drop for RealtimeBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Blocking SSE read loop
///
/// The server's keep-alive comments guarantee `read_line` returns
/// periodically, so the shutdown flag is honored within one keep-alive
/// interval even when no events flow. A dropped store also closes the
/// channel, which ends the loop on the next event.
fn run_stream(
    url: &str,
    token: &str,
    tx: Sender<ChatEvent>,
    shutdown: Arc<AtomicBool>,
) -> Result<(), String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(None)
        .build()
        .map_err(|e| format!("Failed to build client: {}", e))?;

    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Subscription refused: {}", response.status()));
    }

    tracing::info!("Realtime subscription established");

    let mut reader = BufReader::new(response);
    let mut parser = SseFrameParser::new();
    let mut line = String::new();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::debug!("Realtime bridge shut down");
            return Ok(());
        }

        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| format!("Stream read error: {}", e))?;
        if read == 0 {
            return Err("Stream closed by server".to_string());
        }

        if let Some(event) = parser.push_line(&line) {
            if tx.send(event).is_err() {
                // Store is gone; nothing left to deliver to.
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Message;
    use chrono::Utc;
    use uuid::Uuid;

    fn event_json() -> String {
        let event = ChatEvent::NewMessage(Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            text: Some("hi".to_string()),
            image: None,
            created_at: Utc::now(),
        });
        serde_json::to_string(&event).unwrap()
    }

    #[test]
    fn test_parses_complete_frame() {
        let mut parser = SseFrameParser::new();
        let data = event_json();

        assert!(parser.push_line("event: newMessage\n").is_none());
        assert!(parser.push_line(&format!("data: {}\n", data)).is_none());
        let event = parser.push_line("\n").expect("frame should complete");
        assert_eq!(event.name(), "newMessage");
    }

    #[test]
    fn test_ignores_keep_alive_comments() {
        let mut parser = SseFrameParser::new();
        assert!(parser.push_line(":\n").is_none());
        assert!(parser.push_line("\n").is_none());
    }

    #[test]
    fn test_ignores_garbage_data() {
        let mut parser = SseFrameParser::new();
        assert!(parser.push_line("data: not json\n").is_none());
        assert!(parser.push_line("\n").is_none());

        // Parser recovers for the next frame.
        let data = event_json();
        parser.push_line(&format!("data: {}\n", data));
        assert!(parser.push_line("\n").is_some());
    }

    #[test]
    fn test_connect_requires_token() {
        let config = Config::with_server_url("http://127.0.0.1:1");
        assert!(RealtimeBridge::connect(&config).is_err());
    }
}
