use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::narration::NarrationStatus;
use crate::errors::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub text: String,
}

/// Play/pause toggle for the given text.
pub async fn toggle_narration(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> AppResult<Json<NarrationStatus>> {
    Ok(Json(state.narration.toggle(request.text).await?))
}

pub async fn stop_narration(State(state): State<Arc<AppState>>) -> AppResult<Json<NarrationStatus>> {
    Ok(Json(state.narration.stop().await?))
}

pub async fn narration_status(State(state): State<Arc<AppState>>) -> Json<NarrationStatus> {
    Json(state.narration.status())
}
