//! Message router: stateless relative to the presence registry.
//!
//! The private path is gated on the recipient's presence record; the
//! legacy broadcast path is intentionally unconditional and never consults
//! the registry.

use serde_json::Value;

use crate::error::RelayError;
use crate::presence::SessionId;
use crate::state::AppState;
use crate::ws::broadcast::{broadcast_to_others, send_to_session};
use crate::ws::protocol::ServerEvent;

/// Unicast `text` to `recipient` if it currently holds a presence record.
///
/// Fire-and-forget: the error is for the caller's log line only, nothing is
/// surfaced to the sender.
pub fn route_private(
    state: &AppState,
    sender: &SessionId,
    recipient: &SessionId,
    text: String,
) -> Result<(), RelayError> {
    if !state.presence.contains_key(recipient) {
        return Err(RelayError::UnknownRecipient(recipient.clone()));
    }

    send_to_session(
        &state.connections,
        recipient,
        &ServerEvent::ReceivePrivateMessage {
            message: text,
            from: sender.clone(),
        },
    );

    Ok(())
}

/// Deliver `data` verbatim to every connected session except the sender.
pub fn route_broadcast(state: &AppState, sender: &SessionId, data: Value) {
    broadcast_to_others(
        &state.connections,
        sender,
        &ServerEvent::ReceiveMessage(data),
    );
}
