//! Session coordinator — applies inbound events to the shared session.
//!
//! ARCHITECTURE
//! ============
//! Each inbound event is handled under the session write lock: read or
//! mutate the presence registry and document, then fan out through the hub.
//! Handlers never await while holding the lock, so every event is atomic
//! with respect to every other.
//!
//! LIFECYCLE
//! =========
//! A connection is `Connected` once registered with the hub, `Joined` while
//! it has a participant in the registry, and gone after `disconnect`.
//! Cursor and typing relays are accepted in any state; an unjoined sender is
//! reported with no username. A content change from an unjoined connection
//! is applied as well.

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::frame::{ClientEvent, ContentChange, CursorMove, ServerEvent, display_name, now_ms};
use crate::services::hub::Audience;
use crate::state::{AppState, Session};

// =============================================================================
// EVENT HANDLERS
// =============================================================================

impl Session {
    /// Dispatch one inbound event from `conn_id`.
    pub fn apply(&mut self, conn_id: Uuid, event: ClientEvent) {
        match event {
            ClientEvent::UserJoin(data) => self.join(conn_id, display_name(data.as_ref()).as_deref()),
            ClientEvent::ContentChange(ContentChange { content }) => self.change_content(conn_id, content),
            ClientEvent::CursorMove(CursorMove { position }) => self.move_cursor(conn_id, position),
            ClientEvent::Typing(is_typing) => self.typing(conn_id, is_typing.unwrap_or_default()),
        }
    }

    /// Register `conn_id` as a participant and announce it.
    ///
    /// The joiner gets `init` first, peers get `user-joined`, then everyone
    /// (joiner included) gets the new roster.
    pub fn join(&mut self, conn_id: Uuid, name: Option<&str>) {
        let participant = match self.presence.join(conn_id, name) {
            Ok(p) => p,
            Err(e) => {
                error!(%conn_id, error = %e, "session: duplicate join ignored");
                return;
            }
        };

        let users = self.presence.list_all();
        self.hub.send_to(
            conn_id,
            ServerEvent::Init { content: self.document.read().to_owned(), users: users.clone() },
        );
        self.hub
            .send(Audience::AllExcept(conn_id), &ServerEvent::UserJoined(participant.clone()));
        self.hub.send(Audience::All, &ServerEvent::UsersUpdate(users));

        info!(%conn_id, name = %participant.name, users = self.presence.len(), "session: user joined");
    }

    /// Overwrite the document and relay the new content to peers.
    pub fn change_content(&mut self, conn_id: Uuid, content: String) {
        self.document.replace(content.clone());
        self.hub.send(
            Audience::AllExcept(conn_id),
            &ServerEvent::ContentUpdate { content, user_id: conn_id, timestamp: now_ms() },
        );
    }

    pub fn move_cursor(&self, conn_id: Uuid, position: serde_json::Value) {
        self.hub.send(
            Audience::AllExcept(conn_id),
            &ServerEvent::CursorUpdate { user_id: conn_id, position, username: self.presence.name_of(conn_id) },
        );
    }

    pub fn typing(&self, conn_id: Uuid, is_typing: serde_json::Value) {
        self.hub.send(
            Audience::AllExcept(conn_id),
            &ServerEvent::UserTyping { user_id: conn_id, username: self.presence.name_of(conn_id), is_typing },
        );
    }

    /// Drop the transport and, if `conn_id` had joined, announce its departure.
    pub fn disconnect(&mut self, conn_id: Uuid) {
        self.hub.unregister(conn_id);

        let Some(participant) = self.presence.leave(conn_id) else {
            return;
        };

        self.hub.send(
            Audience::All,
            &ServerEvent::UserLeft { user_id: conn_id, username: participant.name.clone() },
        );
        self.hub
            .send(Audience::All, &ServerEvent::UsersUpdate(self.presence.list_all()));

        info!(%conn_id, name = %participant.name, users = self.presence.len(), "session: user left");
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Register a freshly upgraded connection and greet it with its id.
pub async fn connect(state: &AppState, conn_id: Uuid, tx: mpsc::Sender<ServerEvent>) {
    let mut session = state.session.write().await;
    session.hub.register(conn_id, tx);
    session.hub.send_to(conn_id, ServerEvent::Connected { id: conn_id });
    info!(%conn_id, connections = session.hub.connection_count(), "session: transport connected");
}

/// Apply one inbound event.
pub async fn dispatch(state: &AppState, conn_id: Uuid, event: ClientEvent) {
    state.session.write().await.apply(conn_id, event);
}

/// Tear down a connection.
pub async fn disconnect(state: &AppState, conn_id: Uuid) {
    state.session.write().await.disconnect(conn_id);
}

/// Record a transport error. No state changes; the transport reports the
/// disconnect separately.
pub fn transport_error(conn_id: Uuid, err: &(dyn std::error::Error + '_)) {
    warn!(%conn_id, error = %err, "session: transport error");
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
