//! Presence registry: the authoritative in-memory table of joined sessions.
//!
//! Keyed by session id (one live WebSocket connection = one session).
//! Every mutation is immediately followed by a broadcast to all other
//! connected sessions; there is no batching.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;
use crate::ws::broadcast::broadcast_to_others;
use crate::ws::protocol::ServerEvent;

/// Opaque connection identity, assigned at upgrade time and never reused.
pub type SessionId = String;

/// Presence status. The protocol only knows one state today; a session
/// that is not in the registry at all is "not joined".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
}

/// One record per currently-joined session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: SessionId,
    pub name: String,
    pub status: Status,
}

/// Presence table: session id -> UserRecord.
pub type PresenceRegistry = Arc<DashMap<SessionId, UserRecord>>;

pub fn new_presence_registry() -> PresenceRegistry {
    Arc::new(DashMap::new())
}

/// Register `session` under `name` and announce it to every other session.
///
/// A repeated join from the same session overwrites its record. Duplicate
/// display names are permitted and never disambiguated; the session id is
/// the only identity key.
pub fn join(state: &AppState, session: &SessionId, name: &str) -> UserRecord {
    let record = UserRecord {
        id: session.clone(),
        name: name.to_string(),
        status: Status::Active,
    };
    state.presence.insert(session.clone(), record.clone());

    tracing::info!(session = %session, name = %name, "session joined");

    broadcast_to_others(
        &state.connections,
        session,
        &ServerEvent::UserJoin(record.clone()),
    );

    record
}

/// Remove `session` from the registry, announcing the bare session id to
/// every other session. A disconnect with no prior join is a no-op: the
/// registry is untouched and nothing is broadcast.
pub fn leave(state: &AppState, session: &SessionId) {
    if state.presence.remove(session).is_none() {
        return;
    }

    tracing::info!(session = %session, "session left");

    broadcast_to_others(
        &state.connections,
        session,
        &ServerEvent::UserLeave(session.clone()),
    );
}

/// Snapshot of all joined sessions, in arbitrary order.
/// Answers `get_online_users` and seeds a late joiner's view.
pub fn list(state: &AppState) -> Vec<UserRecord> {
    state
        .presence
        .iter()
        .map(|entry| entry.value().clone())
        .collect()
}
