use axum::Router;

use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// Build the axum Router: liveness on the root path plus the WebSocket
/// endpoint. There is no other REST surface.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(liveness))
        .route("/ws", axum::routing::get(ws_handler::ws_upgrade))
        .with_state(state)
}

/// Liveness check on the root path.
async fn liveness() -> &'static str {
    "OK"
}
