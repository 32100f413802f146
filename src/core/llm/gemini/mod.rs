//! Google Gemini `generateContent` client.
//!
//! Sends a single user prompt and joins every text part of every candidate.
//!
//! # Example
//!
//! ```rust,ignore
//! use neura::core::llm::{GeminiClient, GeminiConfig, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = GeminiClient::new(GeminiConfig::new("AIza...")).unwrap();
//!     let text = client.generate("Write a haiku about rust").await.unwrap();
//!     println!("{text}");
//! }
//! ```

mod client;
mod config;
mod messages;

pub use client::GeminiClient;
pub use config::{DEFAULT_GEMINI_MODEL, DEFAULT_REQUEST_TIMEOUT, GEMINI_API_BASE_URL, GeminiConfig};
pub use messages::{
    Candidate, Content, ErrorBody, ErrorDetail, GenerateContentRequest, GenerateContentResponse,
    Part,
};
