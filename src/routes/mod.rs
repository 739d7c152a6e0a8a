//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the websocket endpoint, the JSON status API and the static browser
//! client under one Axum router. Anything not matched by an API route falls
//! through to the static directory.

pub mod api;
pub mod ws;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    let static_files: Router = Router::new()
        .fallback_service(ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true))
        .layer(CompressionLayer::new());

    Router::new()
        .route("/api/status", get(api::status))
        .route("/api/users", get(api::users))
        .route("/api/ws", get(ws::handle_ws))
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(api::healthz))
        .with_state(state)
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
