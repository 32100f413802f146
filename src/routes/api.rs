use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, export, generate, narration};
use crate::state::AppState;
use std::sync::Arc;

/// Create the JSON API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/greeting", get(api::greeting))
        .route("/api/generate", post(generate::generate))
        .route("/api/render", post(generate::render))
        // Narration control
        .route("/api/narration", get(narration::narration_status))
        .route("/api/narration/toggle", post(narration::toggle_narration))
        .route("/api/narration/stop", post(narration::stop_narration))
        .route("/api/export/pdf", post(export::export_pdf_handler))
        .layer(TraceLayer::new_for_http())
}
