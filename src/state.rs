//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. All
//! session data (presence registry, document, live connections) sits in one
//! `Session` behind a single lock. A coordinator operation holds the write
//! lock across its whole read-mutate-broadcast sequence and never awaits
//! inside it, so events are applied one at a time.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::document::Document;
use crate::services::hub::Hub;
use crate::services::presence::PresenceRegistry;

// =============================================================================
// SESSION
// =============================================================================

/// The single global editing session.
#[derive(Debug, Default)]
pub struct Session {
    pub presence: PresenceRegistry,
    pub document: Document,
    pub hub: Hub,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self { presence: PresenceRegistry::new(), document: Document::new(), hub: Hub::new() }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; inner fields are
/// Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { session: Arc::new(RwLock::new(Session::new())), config: Arc::new(config), started_at: Instant::now() }
    }

    /// Seconds since the process started serving.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
