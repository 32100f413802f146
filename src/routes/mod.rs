pub mod api;
pub mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handlers::{api::health_check, page::index};
use crate::state::AppState;

/// Public page and health routes plus the API and WebSocket routers.
pub fn create_app_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(api::create_api_router())
        .merge(ws::create_ws_router())
}
