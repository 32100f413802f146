//! HTTP error type shared by all handlers.
//!
//! Every failure becomes a status code plus a JSON body `{"error": message}`
//! that the page shows as a single notification.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::document::ExportError;
use crate::core::llm::GenerationError;
use crate::core::narration::NarrationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Narration(#[from] NarrationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Generation(GenerationError::EmptyPrompt) => StatusCode::BAD_REQUEST,
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
            Self::Narration(NarrationError::ControllerClosed) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Export(ExportError::EmptyDocument) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the user. Upstream details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(GenerationError::EmptyPrompt) => self.to_string(),
            Self::Generation(GenerationError::MissingApiKey) => {
                "Text generation is not configured on this server.".to_string()
            }
            Self::Generation(_) => {
                "An error occurred while generating the response. Please try again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}
