//! HTTP and WebSocket request handlers
//!
//! This module organizes all handlers into logical groups:
//! - `api` - Health check and greeting
//! - `generate` - Prompt submission and display rendering
//! - `narration` - Narration control and audio streaming
//! - `export` - PDF export
//! - `page` - Single-page UI

pub mod api;
pub mod export;
pub mod generate;
pub mod narration;
pub mod page;

// Re-export commonly used handlers for convenient access
pub use narration::narration_audio_handler;
