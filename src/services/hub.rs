//! Broadcast hub — fan-out to live connections.
//!
//! DESIGN
//! ======
//! Every transport connection registers a bounded `mpsc` sender when it
//! upgrades, before it joins. Fan-out takes an `Audience` predicate and uses
//! `try_send`, so delivering never awaits. A full or closed channel drops that
//! frame for that recipient only; the sender never sees an error.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::frame::ServerEvent;

/// Which live connections receive a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    All,
    AllExcept(Uuid),
}

impl Audience {
    #[must_use]
    pub fn includes(self, conn_id: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::AllExcept(excluded) => excluded != conn_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct Hub {
    /// Live connections: `conn_id` -> sender for outgoing events.
    clients: HashMap<Uuid, mpsc::Sender<ServerEvent>>,
}

impl Hub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, conn_id: Uuid, tx: mpsc::Sender<ServerEvent>) {
        self.clients.insert(conn_id, tx);
    }

    /// Forget a connection. Returns whether it was registered.
    pub fn unregister(&mut self, conn_id: Uuid) -> bool {
        self.clients.remove(&conn_id).is_some()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_connected(&self, conn_id: Uuid) -> bool {
        self.clients.contains_key(&conn_id)
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }

    /// Deliver `event` to a single connection.
    pub fn send_to(&self, conn_id: Uuid, event: ServerEvent) {
        let Some(tx) = self.clients.get(&conn_id) else {
            return;
        };
        deliver(conn_id, tx, event);
    }

    /// Deliver `event` to every live connection matching `audience`.
    pub fn send(&self, audience: Audience, event: &ServerEvent) {
        for (conn_id, tx) in &self.clients {
            if !audience.includes(*conn_id) {
                continue;
            }
            deliver(*conn_id, tx, event.clone());
        }
    }
}

fn deliver(conn_id: Uuid, tx: &mpsc::Sender<ServerEvent>, event: ServerEvent) {
    if let Err(e) = tx.try_send(event) {
        match e {
            mpsc::error::TrySendError::Full(event) => {
                warn!(%conn_id, event = event.name(), "hub: outbound queue full, frame dropped");
            }
            // Connection is shutting down; its disconnect will follow.
            mpsc::error::TrySendError::Closed(_) => {}
        }
    }
}

#[cfg(test)]
#[path = "hub_test.rs"]
mod tests;
