//! Delivery helpers: serialize a server event once, then fan it out over
//! the per-connection channels. A send into a closing connection's channel
//! fails silently and never interrupts delivery to the remaining sessions.

use axum::extract::ws::Message;
use tokio::sync::mpsc;

use super::ConnectionRegistry;
use crate::presence::SessionId;
use crate::ws::protocol::ServerEvent;

fn encode(event: &ServerEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize server event");
            None
        }
    }
}

/// Deliver `event` to every connected session except `except`.
pub fn broadcast_to_others(registry: &ConnectionRegistry, except: &SessionId, event: &ServerEvent) {
    let Some(msg) = encode(event) else { return };

    for entry in registry.iter() {
        if entry.key() == except {
            continue;
        }
        let _ = entry.value().send(msg.clone());
    }
}

/// Deliver `event` to a single connected session. Returns false when the
/// session has no live connection.
pub fn send_to_session(
    registry: &ConnectionRegistry,
    session: &SessionId,
    event: &ServerEvent,
) -> bool {
    let Some(msg) = encode(event) else { return false };

    match registry.get(session) {
        Some(sender) => sender.send(msg).is_ok(),
        None => false,
    }
}

/// Deliver `event` directly over a connection's own channel (snapshot
/// replies that never touch the registry).
pub fn send_event(tx: &mpsc::UnboundedSender<Message>, event: &ServerEvent) {
    if let Some(msg) = encode(event) {
        let _ = tx.send(msg);
    }
}
