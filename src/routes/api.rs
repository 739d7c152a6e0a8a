//! Read-only HTTP status routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::services::presence::Participant;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub active_users: usize,
    /// UTF-16 code units.
    pub document_length: usize,
    /// Seconds since startup.
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<Participant>,
}

/// `GET /api/status` — liveness plus session counters.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse {
        status: "online",
        active_users: session.presence.len(),
        document_length: session.document.len_utf16(),
        uptime: state.uptime_secs(),
    })
}

/// `GET /api/users` — current roster in join order.
pub async fn users(State(state): State<AppState>) -> Json<UsersResponse> {
    let users = state.session.read().await.presence.list_all();
    Json(UsersResponse { users })
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
