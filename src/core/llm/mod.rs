mod base;
pub mod gemini;

pub use base::{
    GenerationError, GenerationResult, NO_RESPONSE_TEXT, TextGenerator, validate_prompt,
};
pub use gemini::{GeminiClient, GeminiConfig};
