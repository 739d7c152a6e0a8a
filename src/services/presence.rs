//! Presence registry — who is joined right now.
//!
//! DESIGN
//! ======
//! One `Participant` per joined connection, kept in join order so roster
//! snapshots are deterministic. Absence is modelled by removal; a stored
//! participant is always `active`. Rosters stay small, so a `Vec` with linear
//! lookup is enough.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::palette;

/// Display name used when a join carries no name.
pub const DEFAULT_NAME: &str = "Anonymous";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PresenceError {
    #[error("connection already joined: {0}")]
    AlreadyJoined(Uuid),
}

/// A joined connection with its display identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    /// Hex colour drawn from the palette at join time.
    pub color: String,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl Participant {
    /// Build a participant for `id`, drawing a colour and stamping the join time.
    #[must_use]
    pub fn new(id: Uuid, name: Option<&str>) -> Self {
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAME);
        Self {
            id,
            name: name.to_owned(),
            color: palette::random_color().to_owned(),
            active: true,
            joined_at: OffsetDateTime::now_utc(),
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    participants: Vec<Participant>,
}

impl PresenceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` as a participant.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyJoined` if `id` is already present.
    pub fn join(&mut self, id: Uuid, name: Option<&str>) -> Result<Participant, PresenceError> {
        if self.get(id).is_some() {
            return Err(PresenceError::AlreadyJoined(id));
        }
        let participant = Participant::new(id, name);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Remove `id`, returning its participant if it had joined.
    pub fn leave(&mut self, id: Uuid) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Display name for `id`, if joined.
    #[must_use]
    pub fn name_of(&self, id: Uuid) -> Option<String> {
        self.get(id).map(|p| p.name.clone())
    }

    /// Roster snapshot in join order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
#[path = "presence_test.rs"]
mod tests;
