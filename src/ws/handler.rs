use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
};
use uuid::Uuid;

use crate::state::AppState;
use crate::ws::actor;

/// GET /ws
///
/// WebSocket upgrade endpoint. Each upgrade mints a fresh session id; the
/// id is the unit of identity for presence and routing and is never reused.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let session = Uuid::new_v4().to_string();
    tracing::info!(session = %session, "WebSocket connection accepted");
    ws.on_upgrade(move |socket| actor::run_connection(socket, state, session))
}
