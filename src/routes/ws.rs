//! WebSocket handler — bidirectional event relay.
//!
//! DESIGN
//! ======
//! On upgrade, assigns a connection id, registers an outbound channel with the
//! hub, and enters a `select!` loop:
//! - Incoming client frames → decode → session coordinator
//! - Hub events for this connection → forward to the socket
//!
//! The handler owns transport concerns only; all session state changes go
//! through `services::session`.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register with hub → `connected` with the connection id
//! 2. Client frames → `ClientEvent` → coordinator fans out via the hub
//! 3. Close, read error, or failed write → coordinator `disconnect`

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::frame::{ClientEvent, ServerEvent};
use crate::services;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4();

    // Per-connection channel for events fanned out by the hub.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerEvent>(state.config.client_channel_capacity);
    services::session::connect(&state, conn_id, client_tx).await;

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        services::session::transport_error(conn_id, &e);
                        break;
                    }
                };
                match msg {
                    Message::Text(text) => process_inbound_text(&state, conn_id, text.as_str()).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = client_rx.recv() => {
                if send_event(&mut socket, conn_id, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    services::session::disconnect(&state, conn_id).await;
    info!(%conn_id, "ws: client disconnected");
}

// =============================================================================
// INBOUND
// =============================================================================

/// Decode one inbound text frame and hand it to the coordinator.
///
/// Frames that do not decode are logged and dropped; the client gets no reply.
async fn process_inbound_text(state: &AppState, conn_id: Uuid, text: &str) {
    let event = match ClientEvent::decode(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%conn_id, error = %e, "ws: invalid inbound frame");
            return;
        }
    };

    debug!(%conn_id, event = event.name(), "ws: recv frame");
    services::session::dispatch(state, conn_id, event).await;
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_event(socket: &mut WebSocket, conn_id: Uuid, event: &ServerEvent) -> Result<(), ()> {
    let json = match event.encode() {
        Ok(j) => j,
        Err(e) => {
            warn!(%conn_id, error = %e, "ws: failed to serialize event");
            return Err(());
        }
    };
    if !event.is_chatty() {
        debug!(%conn_id, event = event.name(), "ws: send frame");
    }
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
