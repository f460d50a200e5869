//! Wire protocol: JSON event frames multiplexed over one WebSocket.
//!
//! Frames are adjacently tagged: `{"event": "...", "data": ...}`. Frames
//! that fail to decode are dropped at this boundary with a warning; the
//! sender gets no feedback and the relay never faults on bad input.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::RelayError;
use crate::markup::{self, MarkupTag};
use crate::presence::{self, SessionId, UserRecord};
use crate::router;
use crate::state::AppState;
use crate::ws::broadcast::send_event;

/// Events a client may send to the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Register presence under a display name.
    Join(JoinPayload),
    /// Request the current presence snapshot.
    GetOnlineUsers,
    /// Ask the relay to deliver a message to exactly one session.
    SendPrivateMessage(PrivateMessagePayload),
    /// Legacy broadcast path: arbitrary JSON, everyone except the sender.
    SendMessage(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinPayload {
    pub name: String,
    /// Collected by login forms; accepted and ignored here. No validation.
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivateMessagePayload {
    pub message: String,
    pub to: SessionId,
    #[serde(default)]
    pub formatting: Vec<MarkupTag>,
}

/// Events the relay sends to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A peer came online.
    UserJoin(UserRecord),
    /// A peer went offline; payload is the bare session id.
    UserLeave(SessionId),
    /// Presence snapshot reply.
    OnlineUsersList(Vec<UserRecord>),
    /// A delivered private message.
    ReceivePrivateMessage { message: String, from: SessionId },
    /// Legacy broadcast delivery, payload verbatim from the sender.
    ReceiveMessage(serde_json::Value),
}

/// Handle one incoming text frame from `session`.
pub fn handle_text_message(
    text: &str,
    tx: &mpsc::UnboundedSender<axum::extract::ws::Message>,
    state: &AppState,
    session: &SessionId,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            let err = RelayError::MalformedPayload(e);
            tracing::warn!(session = %session, error = %err, "dropping undecodable frame");
            return;
        }
    };

    match event {
        ClientEvent::Join(payload) => {
            if payload.phone_number.is_some() {
                tracing::debug!(session = %session, "join carried a phone number (ignored)");
            }
            presence::join(state, session, &payload.name);
        }
        ClientEvent::GetOnlineUsers => {
            let users = presence::list(state);
            send_event(tx, &ServerEvent::OnlineUsersList(users));
        }
        ClientEvent::SendPrivateMessage(payload) => {
            // Markup is applied exactly once, here at forward time. Messages
            // with no tags are forwarded verbatim.
            let rendered = if payload.formatting.is_empty() {
                payload.message
            } else {
                markup::apply_formatting(&payload.message, &payload.formatting)
            };
            if let Err(err) = router::route_private(state, session, &payload.to, rendered) {
                tracing::debug!(session = %session, error = %err, "private message dropped");
            }
        }
        ClientEvent::SendMessage(data) => {
            router::route_broadcast(state, session, data);
        }
    }
}
