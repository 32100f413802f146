//! Base trait and errors for text generation.

use async_trait::async_trait;
use thiserror::Error;

/// Text shown when the service answered without any text.
pub const NO_RESPONSE_TEXT: &str = "No response received.";

/// Errors that can occur while generating text from a prompt.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("Please enter a prompt.")]
    EmptyPrompt,

    #[error("Gemini API key not configured in server environment")]
    MissingApiKey,

    #[error("Failed to reach the text generation service: {0}")]
    Transport(String),

    #[error("Text generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from text generation service: {0}")]
    InvalidResponse(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// Prompt in, generated text out. One prompt per call, no history.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;

    fn name(&self) -> &'static str;
}

/// Reject prompts that are empty after trimming.
pub fn validate_prompt(prompt: &str) -> GenerationResult<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyPrompt);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt() {
        assert_eq!(validate_prompt("  hi \n"), Ok("hi"));
        assert_eq!(validate_prompt(""), Err(GenerationError::EmptyPrompt));
        assert_eq!(validate_prompt(" \t\n "), Err(GenerationError::EmptyPrompt));
    }

    #[test]
    fn test_api_error_display() {
        let err = GenerationError::Api {
            status: 429,
            message: "Resource exhausted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Text generation service returned 429: Resource exhausted"
        );
    }
}
