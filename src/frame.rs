//! Frame — the wire envelope for every websocket message.
//!
//! ARCHITECTURE
//! ============
//! Every message on the socket is a JSON text frame shaped as
//! `{"event": "<name>", "data": <payload>}`. Inbound frames decode into
//! `ClientEvent`, outbound frames encode from `ServerEvent`. Both are closed
//! enums, so dispatch is one exhaustive `match` instead of string routing.
//!
//! DESIGN
//! ======
//! - Event names are kebab-case, payload fields camelCase.
//! - Payloads are trusted as-is. The only rejection is a frame that does not
//!   decode into a known variant at all.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::presence::Participant;

// =============================================================================
// INBOUND
// =============================================================================

/// An event sent by a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join the session under a display name. The payload is taken as-is;
    /// see [`display_name`] for how it becomes a name.
    UserJoin(Option<serde_json::Value>),
    /// Replace the shared document.
    ContentChange(ContentChange),
    /// Relay a cursor position. The position is opaque to the server.
    CursorMove(CursorMove),
    /// Relay a typing indicator. Relayed untouched, `null` when absent.
    Typing(Option<serde_json::Value>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentChange {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CursorMove {
    #[serde(default)]
    pub position: serde_json::Value,
}

impl ClientEvent {
    /// Decode one inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the text is not a known event envelope.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Event name, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserJoin(_) => "user-join",
            Self::ContentChange(_) => "content-change",
            Self::CursorMove(_) => "cursor-move",
            Self::Typing(_) => "typing",
        }
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// An event sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Handshake: tells a fresh connection its own identifier.
    Connected { id: Uuid },
    /// Snapshot for a joining connection only.
    Init { content: String, users: Vec<Participant> },
    UserJoined(Participant),
    UsersUpdate(Vec<Participant>),
    #[serde(rename_all = "camelCase")]
    ContentUpdate { content: String, user_id: Uuid, timestamp: i64 },
    #[serde(rename_all = "camelCase")]
    CursorUpdate { user_id: Uuid, position: serde_json::Value, username: Option<String> },
    #[serde(rename_all = "camelCase")]
    UserTyping { user_id: Uuid, username: Option<String>, is_typing: serde_json::Value },
    #[serde(rename_all = "camelCase")]
    UserLeft { user_id: Uuid, username: String },
}

impl ServerEvent {
    /// Encode as one outbound text frame.
    ///
    /// # Errors
    ///
    /// Returns the serde error if a payload fails to serialize.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Event name, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Init { .. } => "init",
            Self::UserJoined(_) => "user-joined",
            Self::UsersUpdate(_) => "users-update",
            Self::ContentUpdate { .. } => "content-update",
            Self::CursorUpdate { .. } => "cursor-update",
            Self::UserTyping { .. } => "user-typing",
            Self::UserLeft { .. } => "user-left",
        }
    }

    /// High-frequency relays that are not worth a debug log line per frame.
    #[must_use]
    pub fn is_chatty(&self) -> bool {
        matches!(self, Self::CursorUpdate { .. } | Self::UserTyping { .. } | Self::ContentUpdate { .. })
    }
}

/// Name carried by a `user-join` payload.
///
/// Non-empty strings are kept. Falsy payloads (`null`, `""`, `false`, `0`)
/// mean "no name". Anything else is named by its JSON text.
#[must_use]
pub fn display_name(data: Option<&serde_json::Value>) -> Option<String> {
    use serde_json::Value;

    match data? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
        other => Some(other.to_string()),
    }
}

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;
