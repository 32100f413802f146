use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::config::GeminiConfig;
use super::messages::{ErrorBody, GenerateContentRequest, GenerateContentResponse};
use crate::core::llm::base::{
    GenerationError, GenerationResult, NO_RESPONSE_TEXT, TextGenerator, validate_prompt,
};

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> GenerationResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerationError::Transport(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn build_http_request(&self, prompt: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.config.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
    }
}

/// Pull a readable message out of an error response body.
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ if body.trim().is_empty() => "no error details".to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        // Blank prompts are rejected, but the prompt is sent as typed
        validate_prompt(prompt)?;
        debug!(model = %self.config.model, chars = prompt.chars().count(), "Sending prompt to Gemini");

        let response = self
            .build_http_request(prompt)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            warn!(status = status.as_u16(), error = %message, "Gemini request failed");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let text = match parsed.joined_text() {
            Some(text) => text,
            None => {
                warn!(
                    finish_reasons = ?parsed.finish_reasons(),
                    "Gemini response carried no text"
                );
                NO_RESPONSE_TEXT.to_string()
            }
        };
        info!(
            model = %self.config.model,
            candidates = parsed.candidates.len(),
            chars = text.chars().count(),
            "Gemini response received"
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
