use crate::presence::PresenceRegistry;
use crate::ws::ConnectionRegistry;

/// Shared application state passed to all handlers via axum State extractor.
///
/// Everything is in-memory and lost on restart. The presence registry and
/// the connection registry are keyed by the same session ids; a session can
/// be connected without being joined, never the other way around.
#[derive(Clone)]
pub struct AppState {
    /// Joined sessions: session id -> UserRecord
    pub presence: PresenceRegistry,
    /// Active WebSocket connections: session id -> outbound channel
    pub connections: ConnectionRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            presence: crate::presence::new_presence_registry(),
            connections: crate::ws::new_connection_registry(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
