//! Session services used by the websocket and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `presence`, `document` and `hub` are plain in-memory components.
//! `session` coordinates them under the shared lock; routes only translate
//! transport events into coordinator calls.

pub mod document;
pub mod hub;
pub mod palette;
pub mod presence;
pub mod session;
