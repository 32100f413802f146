use axum::{Router, routing::get};

use crate::handlers::narration_audio_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Create the WebSocket router for narration audio listeners
pub fn create_ws_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/narration/audio", get(narration_audio_handler))
}
