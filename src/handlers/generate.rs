//! Prompt submission and display rendering.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::core::llm::{GenerationError, validate_prompt};
use crate::core::narration::NarrationStatus;
use crate::core::render::render_display_html;
use crate::errors::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Generated text exactly as returned
    pub text: String,
    /// Escaped display markup
    pub html: String,
    /// Narration status when the text was queued for auto-play
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<NarrationStatus>,
}

/// Send a prompt to the text generator.
///
/// Empty prompts are rejected before any network call. On success the new
/// text replaces whatever is being narrated when auto-play is enabled.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    validate_prompt(&request.prompt)?;
    let generator = state
        .generator
        .as_ref()
        .ok_or(GenerationError::MissingApiKey)?;

    let text = generator.generate(&request.prompt).await?;
    let html = render_display_html(&text);
    info!(chars = text.chars().count(), "Generated response");

    let narration = if state.config.narration_auto_play {
        Some(state.narration.start(text.clone()).await?)
    } else {
        None
    };

    Ok(Json(GenerateResponse {
        text,
        html,
        narration,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

pub async fn render(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: render_display_html(&request.text),
    })
}
