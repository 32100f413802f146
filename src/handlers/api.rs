use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Health check handler
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "generator": state.generator.as_ref().map(|g| g.name()),
        "synthesizer": state.narration.synthesizer_name(),
        "synthesizer_info": state.narration.synthesizer_info(),
        "narration": state.narration.status().state,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct GreetingQuery {
    /// Caller's local hour (0-23); the server clock is used when absent
    pub hour: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub greeting: &'static str,
}

/// Greeting for an hour of the day.
pub fn greeting_for_hour(hour: u8) -> &'static str {
    match hour {
        0..=11 => "Good Morning!",
        12..=17 => "Good Afternoon!",
        _ => "Good Evening!",
    }
}

fn current_local_hour() -> u8 {
    time::OffsetDateTime::now_local()
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc())
        .hour()
}

pub async fn greeting(Query(query): Query<GreetingQuery>) -> AppResult<Json<GreetingResponse>> {
    let hour = match query.hour {
        Some(hour) if hour < 24 => hour,
        Some(hour) => {
            return Err(AppError::BadRequest(format!(
                "hour must be between 0 and 23, got {hour}"
            )));
        }
        None => current_local_hour(),
    };

    Ok(Json(GreetingResponse {
        greeting: greeting_for_hour(hour),
    }))
}
